use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{TemplateRecord, TemplateStore};
use crate::error::{CvlabError, Result};

/// Template API export saved as JSON
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    Page { results: Vec<TemplateRecord> },
    List(Vec<TemplateRecord>),
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse export content; a paginated page yields its `results`
    pub fn parse(content: &str) -> Result<Vec<TemplateRecord>> {
        let export: Export = serde_json::from_str(content).map_err(|e| {
            CvlabError::StoreInvalid(format!("expected a template array or page: {}", e))
        })?;
        Ok(match export {
            Export::Page { results } => results,
            Export::List(records) => records,
        })
    }
}

impl TemplateStore for JsonFileStore {
    fn list(&self) -> Result<Vec<TemplateRecord>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CvlabError::StoreNotFound {
                    path: self.path.clone(),
                }
            } else {
                CvlabError::IoError(e)
            }
        })?;
        let records = Self::parse(&content)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded templates");
        Ok(records)
    }
}
