//! Package pipeline for the extensions listing builder.
//!
//! [`Pipeline`] turns a [`RunConfig`] into one zip archive per extension in
//! an output directory, reusing published release assets where they exist,
//! and then hands the directory to Blender's listing generator.

pub mod config;
pub mod error;
pub mod listing;
pub mod pipeline;
pub mod probe;
pub mod release;
pub mod report;

pub use config::{GitHubConfig, PackageSpec, RepositoryId, RunConfig};
pub use error::{Error, Result};
pub use listing::ListingGenerator;
pub use listing_git::RefSelector;
pub use pipeline::{Pipeline, artifact_path};
pub use probe::{ProbeOutcome, probe_release};
pub use release::{GitHubReleases, Release, ReleaseAsset, ReleaseSource};
pub use report::{Artifact, PackageOutcome, PackageReport, RunReport, SkipReason};
