//! Extension package content for tests.

use std::io::{Cursor, Read, Write};

use zip::ZipArchive;
use zip::write::{FileOptions, ZipWriter};

/// A minimal `blender_manifest.toml` declaring `id`.
pub fn manifest_toml(id: &str) -> String {
    format!(
        "schema_version = \"1.0.0\"\n\
         id = \"{id}\"\n\
         version = \"1.0.0\"\n\
         name = \"{id}\"\n\
         tagline = \"Test extension\"\n\
         maintainer = \"Test User\"\n\
         type = \"add-on\"\n\
         blender_version_min = \"4.2.0\"\n\
         license = [\"SPDX:GPL-3.0-or-later\"]\n"
    )
}

/// Build a zip archive in memory from `(name, content)` pairs.
///
/// Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

/// Names of all entries in a zip archive, in archive order.
pub fn zip_entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|index| archive.by_index(index).unwrap().name().to_string())
        .collect()
}

/// Content of the entry `name` in a zip archive.
///
/// # Panics
/// Panics if the archive or the entry cannot be read.
pub fn zip_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = archive
        .by_name(name)
        .unwrap_or_else(|e| panic!("zip_entry: missing {name}: {e}"));
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}
