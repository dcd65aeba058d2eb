//! Cloning upstream repositories.

use std::path::Path;

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{AutotagOption, FetchOptions, Repository};

use crate::error::{Error, Result};

/// Clone `url` into `dest` without populating a working tree.
///
/// History and every tag are fetched so that any ref can be checked out
/// later; the checkout itself is a dry run, leaving `dest` empty apart from
/// the `.git` directory.
pub fn clone_no_checkout(url: &str, dest: &Path) -> Result<Repository> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::CloneFailed {
            url: url.to_string(),
            message: format!("Failed to create directory: {}", e),
        })?;
    }

    let mut fetch = FetchOptions::new();
    fetch.download_tags(AutotagOption::All);

    let mut checkout = CheckoutBuilder::new();
    checkout.dry_run();

    tracing::debug!(url = %url, dest = %dest.display(), "Cloning repository");

    RepoBuilder::new()
        .fetch_options(fetch)
        .with_checkout(checkout)
        .clone(url, dest)
        .map_err(|e| Error::CloneFailed {
            url: url.to_string(),
            message: e.message().to_string(),
        })
}
