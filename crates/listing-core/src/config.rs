//! Run configuration.
//!
//! A run is described by an immutable [`RunConfig`]. Packages come from a
//! TOML file of `[[package]]` tables:
//!
//! ```toml
//! [[package]]
//! repository = "Sollumz/Sollumz"
//! latest_stable = true
//!
//! [[package]]
//! repository = "Sollumz/Sollumz"
//! ref = "main"
//! url = "https://example.com/mirror/Sollumz.git"
//! ```
//!
//! Each table names exactly one of `ref` or `latest_stable = true`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use listing_git::RefSelector;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default base URL of the GitHub REST API.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

/// `owner/name` identity of a repository on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId {
    pub owner: String,
    pub name: String,
}

impl RepositoryId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// HTTPS clone URL on GitHub.
    pub fn github_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(Error::InvalidRepository {
                value: value.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for RepositoryId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One configured package: where it lives and which ref to publish.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPackageSpec")]
pub struct PackageSpec {
    pub repository: RepositoryId,
    pub selector: RefSelector,
    /// Clone URL override, GitHub is used when unset.
    pub url: Option<String>,
}

impl PackageSpec {
    pub fn new(repository: RepositoryId, selector: RefSelector) -> Self {
        Self {
            repository,
            selector,
            url: None,
        }
    }

    /// Clone from `url` instead of GitHub.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// The URL the repository is cloned from.
    pub fn clone_url(&self) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| self.repository.github_url())
    }
}

/// `[[package]]` table as written in the config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPackageSpec {
    repository: RepositoryId,
    #[serde(default, rename = "ref")]
    git_ref: Option<String>,
    #[serde(default)]
    latest_stable: bool,
    #[serde(default)]
    url: Option<String>,
}

impl TryFrom<RawPackageSpec> for PackageSpec {
    type Error = String;

    fn try_from(raw: RawPackageSpec) -> std::result::Result<Self, String> {
        let selector = match (raw.git_ref, raw.latest_stable) {
            (Some(name), false) if !name.is_empty() => RefSelector::Literal(name),
            (None, true) => RefSelector::LatestStableRelease,
            (Some(_), true) => {
                return Err(format!(
                    "package {}: 'ref' and 'latest_stable' are mutually exclusive",
                    raw.repository
                ));
            }
            _ => {
                return Err(format!(
                    "package {}: set either a non-empty 'ref' or 'latest_stable = true'",
                    raw.repository
                ));
            }
        };
        Ok(Self {
            repository: raw.repository,
            selector,
            url: raw.url,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default, rename = "package")]
    packages: Vec<PackageSpec>,
}

/// Access to the GitHub REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// API base URL without a trailing slash.
    pub api_url: String,
    /// Token sent as a bearer token when set.
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API.to_string(),
            token: None,
        }
    }
}

/// Everything a run needs, fixed before the first package is processed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunConfig {
    /// Packages in processing order; earlier packages win identifier
    /// collisions.
    pub packages: Vec<PackageSpec>,
    pub github: GitHubConfig,
    /// Parent directory for per-package scratch clones, the system temp
    /// directory when unset.
    pub scratch_root: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(packages: Vec<PackageSpec>) -> Self {
        Self {
            packages,
            ..Self::default()
        }
    }

    /// The packages published when no config file is given.
    pub fn default_packages() -> Vec<PackageSpec> {
        vec![PackageSpec::new(
            RepositoryId::new("Sollumz", "Sollumz"),
            RefSelector::LatestStableRelease,
        )]
    }

    /// Parse the package list from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(Self::new(file.packages))
    }

    /// Load the package list from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_github(mut self, github: GitHubConfig) -> Self {
        self.github = github;
        self
    }

    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_both_selector_kinds_in_order() {
        let config = RunConfig::from_toml_str(
            r#"
[[package]]
repository = "Sollumz/Sollumz"
latest_stable = true

[[package]]
repository = "Sollumz/Sollumz"
ref = "main"
url = "/srv/mirror/Sollumz"
"#,
        )
        .unwrap();

        assert_eq!(
            config.packages,
            vec![
                PackageSpec::new(
                    RepositoryId::new("Sollumz", "Sollumz"),
                    RefSelector::LatestStableRelease
                ),
                PackageSpec::new(
                    RepositoryId::new("Sollumz", "Sollumz"),
                    RefSelector::Literal("main".into())
                )
                .with_url("/srv/mirror/Sollumz"),
            ]
        );
        assert_eq!(config.github, GitHubConfig::default());
    }

    #[test]
    fn test_ref_and_latest_stable_are_exclusive() {
        let result = RunConfig::from_toml_str(
            r#"
[[package]]
repository = "a/b"
ref = "main"
latest_stable = true
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("mutually exclusive"), "{err}");
    }

    #[test]
    fn test_selector_is_required() {
        let result = RunConfig::from_toml_str("[[package]]\nrepository = \"a/b\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = RunConfig::from_toml_str(
            "[[package]]\nrepository = \"a/b\"\nref = \"main\"\nbranch = \"dev\"\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_repository_must_be_owner_and_name() {
        assert!("Sollumz".parse::<RepositoryId>().is_err());
        assert!("a/b/c".parse::<RepositoryId>().is_err());
        assert!("/b".parse::<RepositoryId>().is_err());
        assert_eq!(
            "Sollumz/Sollumz".parse::<RepositoryId>().unwrap(),
            RepositoryId::new("Sollumz", "Sollumz")
        );
    }

    #[test]
    fn test_clone_url_defaults_to_github() {
        let spec = PackageSpec::new(
            RepositoryId::new("Sollumz", "Sollumz"),
            RefSelector::LatestStableRelease,
        );
        assert_eq!(spec.clone_url(), "https://github.com/Sollumz/Sollumz.git");
        assert_eq!(spec.with_url("/tmp/x").clone_url(), "/tmp/x");
    }

    #[test]
    fn test_default_packages_follow_stable_channel() {
        let packages = RunConfig::default_packages();
        assert!(!packages.is_empty());
        assert!(packages.iter().all(|p| p.selector.is_latest_stable()));
    }
}
