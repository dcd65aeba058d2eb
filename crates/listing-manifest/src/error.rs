use std::path::PathBuf;

/// Errors that can occur while looking up a manifest.
///
/// A missing or invalid manifest is not an error here; see
/// [`Rejection`](crate::Rejection).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manifest exists but could not be read.
    #[error("failed to read manifest at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The package archive is not a readable zip container.
    #[error("malformed package archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
