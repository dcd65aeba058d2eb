//! The `blender_manifest.toml` shape this crate inspects.
//!
//! Only `id` is interpreted. Every other key is kept verbatim in
//! [`ExtensionManifest::extra`] and never validated here; the listing
//! generator checks the rest of the schema.

use serde::Deserialize;

/// Extension manifest reduced to the fields the listing builder needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtensionManifest {
    /// Unique extension identifier, the output archive is named after it.
    #[serde(default)]
    pub id: Option<String>,
    /// All remaining manifest keys.
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// Why manifest bytes could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("manifest is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("manifest is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ExtensionManifest {
    /// Parse manifest bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(toml::from_str(text)?)
    }

    /// The extension identifier, if present and non-empty.
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}
