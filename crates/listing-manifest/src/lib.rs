//! Extension manifests for the extensions listing builder.
//!
//! This crate finds a package's manifest (in a checked-out tree or inside a
//! downloaded zip), reads the extension identifier from it, and decides
//! through an [`IdentifierRegistry`] whether the package may be published.

pub mod error;
pub mod locate;
pub mod manifest;
pub mod registry;

/// The canonical filename for extension manifest files.
///
/// Extensions place a file with this name at the root of their package.
pub const MANIFEST_FILENAME: &str = "blender_manifest.toml";

pub use error::{Error, Result};
pub use locate::{read_from_dir, read_from_zip};
pub use manifest::ExtensionManifest;
pub use registry::{IdentifierRegistry, PackageOrigin, Rejection};
