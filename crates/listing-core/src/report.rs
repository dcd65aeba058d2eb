//! What a run produced.

use std::path::{Path, PathBuf};

use listing_git::RefSelector;
use listing_manifest::Rejection;
use sha2::{Digest, Sha256};

use crate::config::RepositoryId;

/// A package archive written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Extension identifier, also the archive's file stem.
    pub id: String,
    pub path: PathBuf,
    pub size: u64,
    /// Hex SHA-256 of the archive.
    pub sha256: String,
}

impl Artifact {
    /// Describe `bytes` written at `path`.
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, bytes: &[u8]) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            size: bytes.len() as u64,
            sha256: format!("{:x}", Sha256::digest(bytes)),
        }
    }

    /// Describe an archive already on disk.
    pub fn read(id: impl Into<String>, path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(id, path, &bytes))
    }
}

/// Why a package produced no artifact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("release asset '{asset}' is not a valid zip archive: {reason}")]
    MalformedAsset { asset: String, reason: String },
}

/// Result of processing one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    Produced(Artifact),
    Skipped(SkipReason),
}

impl PackageOutcome {
    pub fn artifact(&self) -> Option<&Artifact> {
        match self {
            Self::Produced(artifact) => Some(artifact),
            Self::Skipped(_) => None,
        }
    }
}

/// One configured package after processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub repository: RepositoryId,
    pub selector: RefSelector,
    /// The concrete ref the selector resolved to.
    pub git_ref: String,
    pub outcome: PackageOutcome,
}

/// All packages of a run, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub packages: Vec<PackageReport>,
}

impl RunReport {
    /// Artifacts written, in configuration order.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.packages.iter().filter_map(|p| p.outcome.artifact())
    }

    pub fn produced_count(&self) -> usize {
        self.artifacts().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.packages.len() - self.produced_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_artifact_digest_known_value() {
        let artifact = Artifact::new("foo", "/out/foo.zip", b"hello world");
        assert_eq!(artifact.size, 11);
        assert_eq!(
            artifact.sha256,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_counts() {
        let package = |outcome| PackageReport {
            repository: RepositoryId::new("a", "b"),
            selector: RefSelector::Literal("main".into()),
            git_ref: "main".into(),
            outcome,
        };
        let report = RunReport {
            packages: vec![
                package(PackageOutcome::Produced(Artifact::new("foo", "foo.zip", b""))),
                package(PackageOutcome::Skipped(Rejection::MissingManifest.into())),
            ],
        };
        assert_eq!(report.produced_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.artifacts().next().unwrap().id, "foo");
    }
}
