//! Translate command - legacy dialect to canonical dialect

use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::{Context as _, Result};
use colored::Colorize;
use cvlab_core::template::translate_with_diagnostics;
use std::fs;
use std::path::Path;

/// Print the canonical form of `template`
///
/// Translation never fails; directives kept verbatim are reported as
/// warnings on stderr, or inline with `--json`.
pub fn run(ctx: &Context, template: &Path, json: bool) -> Result<()> {
    let path = ctx.resolve(template);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;

    let translation = translate_with_diagnostics(&source);

    if json {
        return print_json(&translation);
    }

    for diagnostic in &translation.diagnostics {
        eprintln!("{} {}", "!".yellow(), diagnostic);
    }
    print_text(&translation.output)?;
    Ok(())
}
