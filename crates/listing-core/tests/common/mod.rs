#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use listing_core::{Release, ReleaseAsset, ReleaseSource, RepositoryId, Result};

/// In-memory releases keyed by `owner/name` and tag.
#[derive(Default)]
pub struct FakeReleases {
    releases: HashMap<(String, String), Release>,
    assets: HashMap<u64, Vec<u8>>,
    pub lookups: RefCell<Vec<String>>,
    pub downloads: RefCell<Vec<u64>>,
}

impl FakeReleases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a release for `tag` with the given `(name, bytes)` assets.
    pub fn publish(&mut self, repository: &str, tag: &str, assets: Vec<(&str, Vec<u8>)>) {
        let mut release = Release {
            tag_name: tag.to_string(),
            assets: Vec::new(),
        };
        for (name, bytes) in assets {
            let id = self.assets.len() as u64 + 1;
            release.assets.push(ReleaseAsset {
                id,
                name: name.to_string(),
                size: bytes.len() as u64,
            });
            self.assets.insert(id, bytes);
        }
        self.releases
            .insert((repository.to_string(), tag.to_string()), release);
    }
}

impl ReleaseSource for FakeReleases {
    fn release_for_tag(&self, repository: &RepositoryId, tag: &str) -> Result<Option<Release>> {
        self.lookups.borrow_mut().push(format!("{repository}@{tag}"));
        Ok(self
            .releases
            .get(&(repository.to_string(), tag.to_string()))
            .cloned())
    }

    fn download_asset(&self, _repository: &RepositoryId, asset: &ReleaseAsset) -> Result<Vec<u8>> {
        self.downloads.borrow_mut().push(asset.id);
        Ok(self.assets[&asset.id].clone())
    }
}
