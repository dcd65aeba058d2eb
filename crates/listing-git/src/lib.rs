//! Git plumbing for the extensions listing builder.
//!
//! Clones upstream repositories without a working tree, resolves the ref to
//! package and writes zip archives straight from a commit tree.

pub mod archive;
pub mod error;
pub mod fetch;
pub mod resolve;

pub use archive::{checkout, write_archive};
pub use error::{Error, Result};
pub use fetch::clone_no_checkout;
pub use resolve::{RefSelector, STABLE_TAG_PATTERN, latest_stable_tag, resolve};
