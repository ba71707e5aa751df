use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::consts::{files, page, preview};
use crate::error::{CvlabError, Result};

/// cvlab.toml schema
///
/// Every section is optional; an absent file is the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON store file or template directory
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(files::DEFAULT_STORE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Document width in millimetres
    #[serde(default = "default_page_width")]
    pub page_width_mm: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            page_width_mm: default_page_width(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(files::DEFAULT_OUTPUT_DIR)
}

fn default_page_width() -> u32 {
    page::A4_WIDTH_MM
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            fallback_message: default_fallback_message(),
        }
    }
}

fn default_fallback_message() -> String {
    preview::FALLBACK_MESSAGE.to_string()
}

impl Config {
    /// Read and validate a cvlab.toml file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CvlabError::ConfigParseError(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse and validate cvlab.toml content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` when given, else `cvlab.toml` in `dir` when present, else defaults
    pub fn load_or_default(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let candidate = dir.join(files::CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::from_file(candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.batch.page_width_mm == 0 {
            return Err(CvlabError::ConfigInvalidValue {
                field: "batch.page_width_mm".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
