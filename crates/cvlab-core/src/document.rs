//! Standalone HTML document around a rendered template
//!
//! Preview and batch output both go through [`wrap_document`], so a template
//! looks the same in either place for the same data.

use crate::config::{consts::page, BatchConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub width_mm: u32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            width_mm: page::A4_WIDTH_MM,
        }
    }
}

impl From<&BatchConfig> for PageSettings {
    fn from(config: &BatchConfig) -> Self {
        Self {
            width_mm: config.page_width_mm,
        }
    }
}

/// Embed rendered HTML and the template's stylesheet in a full document
///
/// The CSS is inserted verbatim after the reset rules. It is never parsed or
/// validated.
pub fn wrap_document(html: &str, css: &str, page: &PageSettings) -> String {
    let mut doc = String::with_capacity(html.len() + css.len() + 320);
    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<style>\n");
    doc.push_str("* { margin: 0; padding: 0; box-sizing: border-box; }\n");
    doc.push_str(&format!("html {{ width: {}mm; }}\n", page.width_mm));
    doc.push_str("body { margin: 0; padding: 0; background: white; }\n");
    doc.push_str("/* Template CSS */\n");
    doc.push_str(css);
    doc.push_str("\n</style>\n</head>\n<body>\n");
    doc.push_str(html);
    doc.push_str("\n</body>\n</html>\n");
    doc
}
