//! Shared test utilities for the extensions listing workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`git`]: [`git::UpstreamRepo`], a real upstream repository built with the `git` CLI
//! - [`package`]: manifest text and in-memory zip builders

pub mod git;
pub mod package;
