//! Error types for listing-core
//!
//! Everything here aborts the whole run. Problems that only skip one
//! package are reported through [`SkipReason`](crate::report::SkipReason).

use std::path::PathBuf;

/// Result type for listing-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a listing run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Git(#[from] listing_git::Error),

    #[error(transparent)]
    Manifest(#[from] listing_manifest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid repository '{value}': expected '<owner>/<name>'")]
    InvalidRepository { value: String },

    #[error("Executable not found: {0}")]
    ExecutableNotFound(PathBuf),

    #[error("Listing generation failed (exit code {code}): {stderr}")]
    ListingFailed { code: i32, stderr: String },

    #[error("Clone of {repository} has no working tree")]
    BareClone { repository: String },
}
