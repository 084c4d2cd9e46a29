//! Definition loading (groups, transitions, circuits, parameters, settings)
//!
//! Every definition is a plain serde structure. Files are read as JSON or
//! TOML depending on their extension.

use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or validating definitions
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Failed to read definition: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse TOML definition: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported definition file '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),
    #[error("Invalid definition: {0}")]
    Invalid(String),
}

/// On-disk format of a definition file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Toml,
}

impl DefinitionFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DefinitionFormat::Json),
            "toml" => Some(DefinitionFormat::Toml),
            _ => None,
        }
    }
}

/// Load a definition from a `.json` or `.toml` file
pub fn load_definition<T: DeserializeOwned>(path: &Path) -> Result<T, DefinitionError> {
    let format = DefinitionFormat::from_path(path)
        .ok_or_else(|| DefinitionError::UnsupportedFormat(path.display().to_string()))?;
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), ?format, "loading definition");
    parse_definition(&content, format)
}

/// Parse a definition from an in-memory string
pub fn parse_definition<T: DeserializeOwned>(
    content: &str,
    format: DefinitionFormat,
) -> Result<T, DefinitionError> {
    match format {
        DefinitionFormat::Json => Ok(serde_json::from_str(content)?),
        DefinitionFormat::Toml => Ok(toml::from_str(content)?),
    }
}
