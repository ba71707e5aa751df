//! Template sources on disk
//!
//! Two layouts are supported:
//!
//! - a JSON export of the template API, either a bare array or a paginated
//!   `{ "results": [...] }` page ([`JsonFileStore`])
//! - a directory with one sub-directory per template ([`DirStore`])

mod dir;
mod json;

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::{CvlabError, Result};

pub use dir::DirStore;
pub use json::JsonFileStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    /// Legacy-dialect markup
    #[serde(alias = "template_html", default)]
    pub template_source: String,
    #[serde(default)]
    pub template_css: String,
}

impl TemplateRecord {
    /// Output file stem: `<id>-<name lowercased>`
    ///
    /// Whitespace runs and path separators become a single `-` in both parts,
    /// so the stem is always one path component.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", path_safe(&self.id), path_safe(&self.name).to_lowercase())
    }
}

fn path_safe(text: &str) -> String {
    let mut safe = String::with_capacity(text.len());
    let mut in_gap = false;
    for c in text.chars() {
        if c.is_whitespace() || c == '/' || c == '\\' {
            if !in_gap {
                safe.push('-');
            }
            in_gap = true;
        } else {
            safe.push(c);
            in_gap = false;
        }
    }
    safe
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

pub trait TemplateStore {
    /// Every template, in store order
    fn list(&self) -> Result<Vec<TemplateRecord>>;

    fn get(&self, id: &str) -> Result<TemplateRecord> {
        self.list()?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| CvlabError::TemplateNotFound(id.to_string()))
    }
}

/// Open a directory as a [`DirStore`], anything else as a [`JsonFileStore`]
pub fn open_store(path: &Path) -> Result<Box<dyn TemplateStore>> {
    if !path.exists() {
        return Err(CvlabError::StoreNotFound {
            path: path.to_path_buf(),
        });
    }
    if path.is_dir() {
        tracing::debug!(path = %path.display(), "opening directory store");
        Ok(Box::new(DirStore::new(path)))
    } else {
        tracing::debug!(path = %path.display(), "opening JSON store");
        Ok(Box::new(JsonFileStore::new(path)))
    }
}
