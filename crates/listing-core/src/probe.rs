//! Reusing pre-built release assets for stable packages.

use std::path::Path;

use listing_manifest::{IdentifierRegistry, PackageOrigin};

use crate::config::RepositoryId;
use crate::error::Result;
use crate::pipeline::artifact_path;
use crate::release::ReleaseSource;
use crate::report::{Artifact, PackageOutcome, SkipReason};

/// Whether the release asset path took care of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// No release or no asset; the caller archives the tag itself.
    NotHandled,
    /// An asset was downloaded. Its outcome is final even when the package
    /// was skipped.
    Handled(PackageOutcome),
}

/// Try to publish the first asset of the release for `tag`.
///
/// The asset's manifest goes through `registry` like any other candidate
/// and, when admitted, the downloaded bytes are written unchanged to
/// `<id>.zip` in `output_dir`. An asset that is not a zip archive skips the
/// package without falling back to the source tree.
pub fn probe_release(
    releases: &dyn ReleaseSource,
    repository: &RepositoryId,
    tag: &str,
    registry: &mut IdentifierRegistry,
    output_dir: &Path,
) -> Result<ProbeOutcome> {
    let Some(release) = releases.release_for_tag(repository, tag)? else {
        tracing::info!(repository = %repository, tag = %tag, "No release published for tag");
        return Ok(ProbeOutcome::NotHandled);
    };
    let Some(asset) = release.assets.first() else {
        tracing::info!(repository = %repository, tag = %tag, "Release has no assets");
        return Ok(ProbeOutcome::NotHandled);
    };

    tracing::info!(
        repository = %repository,
        tag = %tag,
        asset = %asset.name,
        "Using release asset"
    );
    let bytes = releases.download_asset(repository, asset)?;

    let manifest = match listing_manifest::read_from_zip(&bytes, &asset.name) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::error!(
                repository = %repository,
                tag = %tag,
                asset = %asset.name,
                error = %e,
                "Release asset is not a valid zip archive, skipping package"
            );
            return Ok(ProbeOutcome::Handled(PackageOutcome::Skipped(
                SkipReason::MalformedAsset {
                    asset: asset.name.clone(),
                    reason: e.to_string(),
                },
            )));
        }
    };

    let origin = PackageOrigin::new(repository.to_string(), tag);
    let id = match registry.admit(manifest.as_deref(), &origin) {
        Ok(id) => id,
        Err(rejection) => {
            return Ok(ProbeOutcome::Handled(PackageOutcome::Skipped(
                rejection.into(),
            )));
        }
    };

    let dest = artifact_path(output_dir, &id);
    std::fs::write(&dest, &bytes)?;
    Ok(ProbeOutcome::Handled(PackageOutcome::Produced(
        Artifact::new(id, dest, &bytes),
    )))
}
