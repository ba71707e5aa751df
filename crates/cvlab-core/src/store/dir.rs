use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{TemplateRecord, TemplateStore};
use crate::config::consts::files::{TEMPLATE_CSS, TEMPLATE_HTML, TEMPLATE_META};
use crate::error::{CvlabError, Result};

/// One sub-directory per template
///
/// ```text
/// templates/
/// ├── classic/
/// │   ├── template.html
/// │   ├── template.css     (optional)
/// │   └── meta.toml        (optional: id, name)
/// └── modern/
///     └── template.html
/// ```
///
/// Without `meta.toml` both id and name are the directory name. Directories
/// without `template.html` are skipped.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct Meta {
    id: Option<String>,
    name: Option<String>,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, dir: &Path) -> Result<Option<TemplateRecord>> {
        let html_path = dir.join(TEMPLATE_HTML);
        if !html_path.is_file() {
            return Ok(None);
        }

        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let meta_path = dir.join(TEMPLATE_META);
        let meta = if meta_path.is_file() {
            let content = std::fs::read_to_string(&meta_path)?;
            toml::from_str::<Meta>(&content).map_err(|e| {
                CvlabError::StoreInvalid(format!("{}: {}", meta_path.display(), e))
            })?
        } else {
            Meta::default()
        };

        let css_path = dir.join(TEMPLATE_CSS);
        let template_css = if css_path.is_file() {
            std::fs::read_to_string(&css_path)?
        } else {
            String::new()
        };

        Ok(Some(TemplateRecord {
            id: meta.id.unwrap_or_else(|| dir_name.clone()),
            name: meta.name.unwrap_or(dir_name),
            template_source: std::fs::read_to_string(&html_path)?,
            template_css,
        }))
    }
}

impl TemplateStore for DirStore {
    fn list(&self) -> Result<Vec<TemplateRecord>> {
        if !self.root.is_dir() {
            return Err(CvlabError::StoreNotFound {
                path: self.root.clone(),
            });
        }

        let mut records = Vec::new();
        let entries = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("WalkDir error: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            match self.load(entry.path())? {
                Some(record) => records.push(record),
                None => tracing::debug!(dir = %entry.path().display(), "no template.html, skipped"),
            }
        }

        Ok(records)
    }
}
