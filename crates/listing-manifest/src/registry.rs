//! Per-run registry of claimed extension identifiers.

use std::collections::HashMap;
use std::fmt;

use crate::manifest::ExtensionManifest;

/// The upstream repository and resolved ref a package candidate came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOrigin {
    /// Repository identity, e.g. `Sollumz/Sollumz`.
    pub repository: String,
    /// Resolved ref, e.g. `v2.5.0` or `main`.
    pub git_ref: String,
}

impl PackageOrigin {
    pub fn new(repository: impl Into<String>, git_ref: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            git_ref: git_ref.into(),
        }
    }
}

impl fmt::Display for PackageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repository, self.git_ref)
    }
}

/// Why a package candidate may not be published.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("manifest file not found")]
    MissingManifest,

    #[error("manifest could not be parsed: {reason}")]
    MalformedManifest { reason: String },

    #[error("manifest has no 'id' field")]
    MissingId,

    #[error("extension id '{id}' may only contain ASCII letters, digits, '_' and '-'")]
    InvalidId { id: String },

    #[error("extension id '{id}' already claimed by {claimed_by}")]
    Collision { id: String, claimed_by: PackageOrigin },
}

/// Identifiers claimed so far in this run, with the package that claimed
/// each one first.
///
/// Claims are only ever added, so the first package to present an
/// identifier keeps it for the rest of the run.
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    claims: HashMap<String, PackageOrigin>,
}

impl IdentifierRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a candidate's manifest and claim its identifier.
    ///
    /// `manifest` is the raw manifest content, `None` when the candidate has
    /// none. On success the identifier is registered against `origin` and
    /// returned. Every rejection is logged with the candidate's origin.
    pub fn admit(
        &mut self,
        manifest: Option<&[u8]>,
        origin: &PackageOrigin,
    ) -> Result<String, Rejection> {
        let result = self.check(manifest);
        match &result {
            Ok(id) => {
                tracing::debug!(origin = %origin, id = %id, "Claimed extension id");
                self.claims.insert(id.clone(), origin.clone());
            }
            Err(rejection) => {
                tracing::warn!(
                    repository = %origin.repository,
                    git_ref = %origin.git_ref,
                    reason = %rejection,
                    "Skipping package"
                );
            }
        }
        result
    }

    fn check(&self, manifest: Option<&[u8]>) -> Result<String, Rejection> {
        let bytes = manifest.ok_or(Rejection::MissingManifest)?;
        let manifest =
            ExtensionManifest::from_slice(bytes).map_err(|e| Rejection::MalformedManifest {
                reason: e.to_string(),
            })?;
        let id = manifest.identifier().ok_or(Rejection::MissingId)?;
        if !is_valid_id(id) {
            return Err(Rejection::InvalidId { id: id.to_string() });
        }

        if let Some(claimed_by) = self.claims.get(id) {
            return Err(Rejection::Collision {
                id: id.to_string(),
                claimed_by: claimed_by.clone(),
            });
        }
        Ok(id.to_string())
    }

    /// The package that claimed `id`, if any.
    pub fn claimant(&self, id: &str) -> Option<&PackageOrigin> {
        self.claims.get(id)
    }

    /// Number of claimed identifiers.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether no identifier has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Whether `id` can name the output archive: a single file name stem with
/// no separators, dots or control characters.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        for id in ["sollumz", "my_addon", "node-wrangler", "Addon2"] {
            assert!(is_valid_id(id), "{id}");
        }
    }

    #[test]
    fn test_invalid_ids() {
        for id in ["", "nested/name", "..", "../escaped", "a\\b", "dotted.name", "nul\0", "sp ace"] {
            assert!(!is_valid_id(id), "{id:?}");
        }
    }
}
