//! Deciding which commit of an upstream repository gets packaged.

use std::fmt;

use git2::{Commit, DescribeFormatOptions, DescribeOptions, Repository};

use crate::error::{Error, Result};

/// Tag pattern of a stable release (`v<major>.<minor>.<patch>` prefix).
pub const STABLE_TAG_PATTERN: &str = "v[0-9]*.[0-9]*.[0-9]*";

/// Which ref of a repository to package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefSelector {
    /// A branch, tag or commit name, packaged as is.
    Literal(String),
    /// The most recent stable release tag reachable from the default branch.
    LatestStableRelease,
}

impl RefSelector {
    /// Whether this selector follows the stable release channel.
    pub fn is_latest_stable(&self) -> bool {
        matches!(self, Self::LatestStableRelease)
    }
}

impl fmt::Display for RefSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(name) => f.write_str(name),
            Self::LatestStableRelease => f.write_str("latest stable release"),
        }
    }
}

/// Turn a selector into a concrete commit-ish.
///
/// Literal selectors are returned unchanged; they are only looked up when
/// checked out.
pub fn resolve(repo: &Repository, selector: &RefSelector) -> Result<String> {
    match selector {
        RefSelector::Literal(name) => Ok(name.clone()),
        RefSelector::LatestStableRelease => latest_stable_tag(repo),
    }
}

/// Name of the closest stable tag reachable from HEAD.
///
/// Equivalent to `git describe --tags --abbrev=0 --match <STABLE_TAG_PATTERN>`,
/// so ties and ordering follow git's own describe rules rather than a
/// lexical sort of tag names.
pub fn latest_stable_tag(repo: &Repository) -> Result<String> {
    let no_tag = |e: git2::Error| Error::NoStableTag {
        pattern: STABLE_TAG_PATTERN.to_string(),
        message: e.message().to_string(),
    };

    let head = repo.head().map_err(no_tag)?.peel_to_commit().map_err(no_tag)?;

    let mut opts = DescribeOptions::new();
    opts.describe_tags().pattern(STABLE_TAG_PATTERN);
    let describe = head.as_object().describe(&opts).map_err(no_tag)?;

    let mut format = DescribeFormatOptions::new();
    format.abbreviated_size(0);
    let tag = describe.format(Some(&format))?;

    tracing::debug!(tag = %tag, head = %head.id(), "Resolved latest stable tag");
    Ok(tag)
}

/// Look up a commit-ish in a fresh clone.
///
/// Only the default branch exists locally after cloning, so other branch
/// names are retried as remote-tracking branches of `origin`.
pub fn find_commit<'r>(repo: &'r Repository, commit_ish: &str) -> Result<Commit<'r>> {
    let object = match repo.revparse_single(commit_ish) {
        Ok(object) => object,
        Err(_) => repo
            .revparse_single(&format!("origin/{commit_ish}"))
            .map_err(|_| Error::RefNotFound {
                name: commit_ish.to_string(),
            })?,
    };
    Ok(object.peel_to_commit()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_literal_is_ref_name() {
        assert_eq!(RefSelector::Literal("main".into()).to_string(), "main");
    }

    #[test]
    fn test_only_latest_stable_is_stable() {
        assert!(RefSelector::LatestStableRelease.is_latest_stable());
        assert!(!RefSelector::Literal("v1.0.0".into()).is_latest_stable());
    }
}
