//! The package pipeline.
//!
//! Packages are processed one after another in configuration order:
//! clone, resolve the ref, try the release asset (stable packages only),
//! otherwise check out and archive the ref. The manifest gate decides in
//! both cases whether an archive is written. Finally the listing generator
//! runs once over the output directory.

use std::path::{Path, PathBuf};

use git2::Repository;
use listing_manifest::{IdentifierRegistry, PackageOrigin};
use tempfile::TempDir;

use crate::config::{PackageSpec, RunConfig};
use crate::error::{Error, Result};
use crate::listing::ListingGenerator;
use crate::probe::{ProbeOutcome, probe_release};
use crate::release::ReleaseSource;
use crate::report::{Artifact, PackageOutcome, PackageReport, RunReport};

const SCRATCH_PREFIX: &str = "gen-listing-";

/// Output archive path for extension `id`.
pub fn artifact_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(format!("{id}.zip"))
}

/// One listing run over a fixed configuration.
pub struct Pipeline<'a> {
    config: &'a RunConfig,
    releases: &'a dyn ReleaseSource,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a RunConfig, releases: &'a dyn ReleaseSource) -> Self {
        Self { config, releases }
    }

    /// Build every package into `output_dir`, then generate the listing.
    pub fn run(&self, generator: &ListingGenerator, output_dir: &Path) -> Result<RunReport> {
        let report = self.build_packages(output_dir)?;
        generator.generate(output_dir)?;
        Ok(report)
    }

    /// Build every configured package into `output_dir`.
    ///
    /// Skipped packages are part of the report; the first fatal error
    /// aborts the remaining packages.
    pub fn build_packages(&self, output_dir: &Path) -> Result<RunReport> {
        std::fs::create_dir_all(output_dir)?;
        if self.config.packages.is_empty() {
            tracing::warn!("No packages configured");
        }

        let mut registry = IdentifierRegistry::new();
        let mut report = RunReport::default();
        for spec in &self.config.packages {
            report
                .packages
                .push(self.build_package(spec, &mut registry, output_dir)?);
        }

        tracing::info!(
            produced = report.produced_count(),
            skipped = report.skipped_count(),
            "Built packages"
        );
        Ok(report)
    }

    fn build_package(
        &self,
        spec: &PackageSpec,
        registry: &mut IdentifierRegistry,
        output_dir: &Path,
    ) -> Result<PackageReport> {
        // Removed on drop, whichever way this function returns.
        let scratch = self.scratch_dir()?;
        let url = spec.clone_url();
        tracing::info!(
            repository = %spec.repository,
            selector = %spec.selector,
            url = %url,
            "Processing package"
        );

        let repo = listing_git::clone_no_checkout(&url, &scratch.path().join("repo"))?;
        let git_ref = listing_git::resolve(&repo, &spec.selector)?;
        tracing::info!(repository = %spec.repository, git_ref = %git_ref, "Resolved ref");

        let outcome = match self.try_release(spec, &git_ref, registry, output_dir)? {
            ProbeOutcome::Handled(outcome) => outcome,
            ProbeOutcome::NotHandled => {
                archive_source(&repo, spec, &git_ref, registry, output_dir)?
            }
        };

        if let PackageOutcome::Produced(artifact) = &outcome {
            tracing::info!(
                repository = %spec.repository,
                git_ref = %git_ref,
                id = %artifact.id,
                path = %artifact.path.display(),
                "Wrote package"
            );
        }

        Ok(PackageReport {
            repository: spec.repository.clone(),
            selector: spec.selector.clone(),
            git_ref,
            outcome,
        })
    }

    fn try_release(
        &self,
        spec: &PackageSpec,
        git_ref: &str,
        registry: &mut IdentifierRegistry,
        output_dir: &Path,
    ) -> Result<ProbeOutcome> {
        if !spec.selector.is_latest_stable() {
            return Ok(ProbeOutcome::NotHandled);
        }
        probe_release(self.releases, &spec.repository, git_ref, registry, output_dir)
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match &self.config.scratch_root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}

/// Check out `git_ref`, validate its manifest and archive it.
fn archive_source(
    repo: &Repository,
    spec: &PackageSpec,
    git_ref: &str,
    registry: &mut IdentifierRegistry,
    output_dir: &Path,
) -> Result<PackageOutcome> {
    let commit = listing_git::checkout(repo, git_ref)?;
    let workdir = repo.workdir().ok_or_else(|| Error::BareClone {
        repository: spec.repository.to_string(),
    })?;

    let manifest = listing_manifest::read_from_dir(workdir)?;
    let origin = PackageOrigin::new(spec.repository.to_string(), git_ref);
    let id = match registry.admit(manifest.as_deref(), &origin) {
        Ok(id) => id,
        Err(rejection) => return Ok(PackageOutcome::Skipped(rejection.into())),
    };

    let dest = artifact_path(output_dir, &id);
    listing_git::write_archive(repo, &commit, &dest)?;
    Ok(PackageOutcome::Produced(Artifact::read(id, &dest)?))
}
