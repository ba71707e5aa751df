use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvlabError {
    // Store errors
    #[error("STORE_NOT_FOUND: template store '{path}' does not exist")]
    StoreNotFound { path: PathBuf },

    #[error("STORE_INVALID: {0}")]
    StoreInvalid(String),

    #[error("TEMPLATE_NOT_FOUND: template '{0}' not found in store")]
    TemplateNotFound(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Data errors
    #[error("DATA_INVALID: failed to parse resume data: {0}")]
    DataInvalid(String),

    // Render errors
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(#[from] crate::template::TemplateError),

    // Batch errors
    #[error("BATCH_OUTPUT_FAILED: cannot write '{path}': {reason}")]
    BatchOutputFailed { path: PathBuf, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for CvlabError {
    fn from(err: serde_json::Error) -> Self {
        CvlabError::Generic(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for CvlabError {
    fn from(err: toml::de::Error) -> Self {
        CvlabError::ConfigParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CvlabError>;
