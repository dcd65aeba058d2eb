//! Error types for listing-git

use std::path::PathBuf;

/// Result type for listing-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in listing-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    #[error("Ref '{name}' not found")]
    RefNotFound { name: String },

    #[error("No tag matching '{pattern}' is reachable from HEAD: {message}")]
    NoStableTag { pattern: String, message: String },

    #[error("Failed to checkout '{commit_ish}': {message}")]
    CheckoutFailed { commit_ish: String, message: String },

    #[error("Cannot archive into {path}: {reason}")]
    InvalidArchivePath { path: PathBuf, reason: String },
}
