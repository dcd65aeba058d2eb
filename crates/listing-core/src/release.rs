//! Published releases on the hosting service.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::{GitHubConfig, RepositoryId};
use crate::error::Result;

const USER_AGENT: &str = concat!("gen-listing/", env!("CARGO_PKG_VERSION"));

/// A release published for a tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    /// Downloadable assets in the order the hosting service lists them.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A pre-built file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

/// Where release metadata and assets come from.
pub trait ReleaseSource {
    /// The release published for `tag`, `None` if there is none.
    fn release_for_tag(&self, repository: &RepositoryId, tag: &str) -> Result<Option<Release>>;

    /// Raw bytes of `asset`.
    fn download_asset(&self, repository: &RepositoryId, asset: &ReleaseAsset) -> Result<Vec<u8>>;
}

/// [`ReleaseSource`] backed by the GitHub REST API.
pub struct GitHubReleases {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubReleases {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn get(&self, url: &str, accept: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl ReleaseSource for GitHubReleases {
    fn release_for_tag(&self, repository: &RepositoryId, tag: &str) -> Result<Option<Release>> {
        let url = format!(
            "{}/repos/{}/{}/releases/tags/{}",
            self.api_url, repository.owner, repository.name, tag
        );
        tracing::debug!(url = %url, "Looking up release");

        let response = self.get(&url, "application/vnd.github+json").send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json()?))
    }

    fn download_asset(&self, repository: &RepositoryId, asset: &ReleaseAsset) -> Result<Vec<u8>> {
        let url = format!(
            "{}/repos/{}/{}/releases/assets/{}",
            self.api_url, repository.owner, repository.name, asset.id
        );
        tracing::debug!(url = %url, asset = %asset.name, "Downloading release asset");

        let bytes = self
            .get(&url, "application/octet-stream")
            .send()?
            .error_for_status()?
            .bytes()?;
        Ok(bytes.to_vec())
    }
}
