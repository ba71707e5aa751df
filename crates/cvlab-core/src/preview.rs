//! Live preview of a template while its data changes
//!
//! A [`PreviewSession`] is fed the current template and context on every
//! edit. Render failures never escape it: the previous good document is kept
//! on screen, or a fallback message when nothing has rendered yet.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::PreviewConfig;
use crate::document::{wrap_document, PageSettings};
use crate::template::value::escape_html;
use crate::template::{translate_with_diagnostics, Diagnostic, Engine, Template, TemplateError};

/// Compiled templates kept before the cache is reset
const CACHE_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    /// Document reflects the latest input
    Fresh,
    /// Latest input failed; document is the last good render
    Stale { error: TemplateError },
    /// Latest input failed and nothing rendered before it
    Unavailable { error: TemplateError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFrame {
    pub document: String,
    pub state: PreviewState,
    /// Directives the translator kept verbatim
    pub warnings: Vec<Diagnostic>,
}

impl PreviewFrame {
    pub fn is_fresh(&self) -> bool {
        self.state == PreviewState::Fresh
    }
}

#[derive(Debug)]
struct Compiled {
    template: Result<Arc<Template>, TemplateError>,
    warnings: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct PreviewSession {
    engine: Engine,
    page: PageSettings,
    fallback_message: String,
    cache: HashMap<String, Arc<Compiled>>,
    last_good: Option<String>,
}

impl PreviewSession {
    pub fn new(engine: Engine) -> Self {
        Self::with_config(engine, &PreviewConfig::default(), PageSettings::default())
    }

    pub fn with_config(engine: Engine, config: &PreviewConfig, page: PageSettings) -> Self {
        Self {
            engine,
            page,
            fallback_message: config.fallback_message.clone(),
            cache: HashMap::new(),
            last_good: None,
        }
    }

    /// Render `source` with `context` and produce the document to display
    ///
    /// The last good document is kept across source edits, so a template
    /// being typed shows its previous render while it is broken. It belongs
    /// to whatever source produced it: call [`reset`](Self::reset) when the
    /// session moves to a different template.
    pub fn update(&mut self, source: &str, css: &str, context: &Value) -> PreviewFrame {
        let compiled = self.compiled(source);
        let warnings = compiled.warnings.clone();

        let rendered = match &compiled.template {
            Ok(template) => self.engine.render_compiled(template, context),
            Err(error) => Err(error.clone()),
        };

        match rendered {
            Ok(html) => {
                let document = wrap_document(&html, css, &self.page);
                self.last_good = Some(document.clone());
                PreviewFrame {
                    document,
                    state: PreviewState::Fresh,
                    warnings,
                }
            }
            Err(error) => {
                tracing::warn!(%error, "preview render failed");
                match &self.last_good {
                    Some(document) => PreviewFrame {
                        document: document.clone(),
                        state: PreviewState::Stale { error },
                        warnings,
                    },
                    None => PreviewFrame {
                        document: self.fallback_document(),
                        state: PreviewState::Unavailable { error },
                        warnings,
                    },
                }
            }
        }
    }

    /// Forget the last good render, e.g. when switching templates
    pub fn reset(&mut self) {
        self.last_good = None;
    }

    pub fn cached_templates(&self) -> usize {
        self.cache.len()
    }

    fn compiled(&mut self, source: &str) -> Arc<Compiled> {
        if let Some(compiled) = self.cache.get(source) {
            return Arc::clone(compiled);
        }

        if self.cache.len() >= CACHE_CAPACITY {
            self.cache.clear();
        }

        let translation = translate_with_diagnostics(source);
        let compiled = Arc::new(Compiled {
            template: self.engine.compile(&translation.output).map(Arc::new),
            warnings: translation.diagnostics,
        });
        self.cache.insert(source.to_string(), Arc::clone(&compiled));
        compiled
    }

    fn fallback_document(&self) -> String {
        let html = format!(
            "<p class=\"preview-unavailable\">{}</p>",
            escape_html(&self.fallback_message)
        );
        wrap_document(&html, "", &self.page)
    }
}
