//! Finding the manifest of a package.

use std::io::{Cursor, Read};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::MANIFEST_FILENAME;
use crate::error::{Error, Result};

/// Read the manifest at the root of a checked-out package tree.
///
/// Returns `Ok(None)` when the tree has no manifest.
pub fn read_from_dir(dir: &Path) -> Result<Option<Vec<u8>>> {
    let path = dir.join(MANIFEST_FILENAME);
    match std::fs::read(&path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read { path, source }),
    }
}

/// Read the manifest out of a package archive.
///
/// The manifest may sit at the archive root or inside a single top-level
/// directory named after the asset (`asset_name` without its `.zip` suffix).
/// Returns `Ok(None)` when neither location holds one, and
/// [`Error::Archive`] when `bytes` is not a well-formed zip.
pub fn read_from_zip(bytes: &[u8], asset_name: &str) -> Result<Option<Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let stem = asset_name.strip_suffix(".zip").unwrap_or(asset_name);
    let candidates = [
        MANIFEST_FILENAME.to_string(),
        format!("{stem}/{MANIFEST_FILENAME}"),
    ];

    for candidate in &candidates {
        let mut entry = match archive.by_name(candidate) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => continue,
            Err(e) => return Err(e.into()),
        };
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|e| Error::Archive(e.into()))?;
        tracing::debug!(entry = %candidate, "Found manifest in archive");
        return Ok(Some(content));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_test_utils::package::{manifest_toml, zip_bytes};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_read_from_dir_missing_is_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(read_from_dir(temp.path()).unwrap(), None);
    }

    #[test]
    fn test_read_from_dir_returns_content() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(MANIFEST_FILENAME), manifest_toml("foo")).unwrap();
        let bytes = read_from_dir(temp.path()).unwrap().unwrap();
        assert_eq!(bytes, manifest_toml("foo").into_bytes());
    }

    #[test]
    fn test_read_from_zip_at_root() {
        let bytes = zip_bytes(&[(MANIFEST_FILENAME, "id = \"root\"\n")]);
        let found = read_from_zip(&bytes, "whatever.zip").unwrap().unwrap();
        assert_eq!(found, b"id = \"root\"\n".to_vec());
    }

    #[test]
    fn test_read_from_zip_in_asset_directory() {
        let bytes = zip_bytes(&[
            ("Sollumz-2.5.0/", ""),
            ("Sollumz-2.5.0/blender_manifest.toml", "id = \"nested\"\n"),
        ]);
        let found = read_from_zip(&bytes, "Sollumz-2.5.0.zip").unwrap().unwrap();
        assert_eq!(found, b"id = \"nested\"\n".to_vec());
    }

    #[test]
    fn test_read_from_zip_ignores_other_directories() {
        let bytes = zip_bytes(&[("other/blender_manifest.toml", "id = \"x\"\n")]);
        assert_eq!(read_from_zip(&bytes, "Sollumz.zip").unwrap(), None);
    }

    #[test]
    fn test_read_from_zip_rejects_non_zip_bytes() {
        let result = read_from_zip(b"<html>Not Found</html>", "asset.zip");
        assert!(matches!(result, Err(Error::Archive(_))));
    }
}
