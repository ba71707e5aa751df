//! Render every template of a store with one context
//!
//! Each template becomes `<id>-<slug>.html` in the output directory, wrapped
//! in the same document shell the preview uses. A failing template is
//! recorded in the report and the run moves on to the next one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::consts::files::OUTPUT_EXTENSION;
use crate::config::BatchConfig;
use crate::document::{wrap_document, PageSettings};
use crate::error::{CvlabError, Result};
use crate::store::{TemplateRecord, TemplateStore};
use crate::template::Engine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub template_id: String,
    pub template_name: String,
    /// File name inside the output directory, set on success
    pub file: Option<String>,
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub output_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

#[derive(Debug, Clone)]
pub struct BatchRenderer {
    engine: Engine,
    output_dir: PathBuf,
    page: PageSettings,
}

impl BatchRenderer {
    pub fn new(engine: Engine, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            output_dir: output_dir.into(),
            page: PageSettings::default(),
        }
    }

    pub fn from_config(engine: Engine, config: &BatchConfig) -> Self {
        Self {
            engine,
            output_dir: config.output_dir.clone(),
            page: PageSettings::from(config),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render all templates of `store` against `context`
    ///
    /// Only an unreadable store or an uncreatable output directory fails the
    /// whole run.
    pub fn run(&self, store: &dyn TemplateStore, context: &Value) -> Result<BatchReport> {
        let started_at = Utc::now();
        let timer = Instant::now();

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            CvlabError::BatchOutputFailed {
                path: self.output_dir.clone(),
                reason: e.to_string(),
            }
        })?;

        let records = store.list()?;
        tracing::info!(
            templates = records.len(),
            output_dir = %self.output_dir.display(),
            "starting batch render"
        );

        let outcomes: Vec<BatchOutcome> = records
            .iter()
            .map(|record| self.render_one(record, context))
            .collect();

        let report = BatchReport {
            output_dir: self.output_dir.clone(),
            started_at,
            finished_at: Utc::now(),
            duration_ms: timer.elapsed().as_millis() as u64,
            outcomes,
        };
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch render finished"
        );
        Ok(report)
    }

    fn render_one(&self, record: &TemplateRecord, context: &Value) -> BatchOutcome {
        let result = self.write_document(record, context);
        match &result {
            Ok(file) => tracing::info!(template = %record.name, %file, "rendered"),
            Err(error) => tracing::warn!(template = %record.name, %error, "template failed"),
        }

        let (file, error) = match result {
            Ok(file) => (Some(file), None),
            Err(error) => (None, Some(error.to_string())),
        };
        BatchOutcome {
            template_id: record.id.clone(),
            template_name: record.name.clone(),
            file,
            error,
        }
    }

    fn write_document(&self, record: &TemplateRecord, context: &Value) -> Result<String> {
        if record.template_source.trim().is_empty() {
            return Err(CvlabError::Generic(format!(
                "template '{}' has no source",
                record.id
            )));
        }

        let html = self.engine.render(&record.template_source, context)?;
        let document = wrap_document(&html, &record.template_css, &self.page);

        let file = format!("{}.{}", record.file_stem(), OUTPUT_EXTENSION);
        let path = self.output_dir.join(&file);
        std::fs::write(&path, document).map_err(|e| CvlabError::BatchOutputFailed {
            path,
            reason: e.to_string(),
        })?;
        Ok(file)
    }
}
