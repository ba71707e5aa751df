//! Audit command - which context variables a template uses

use crate::context::Context;
use crate::output::print_json;
use anyhow::{Context as _, Result};
use colored::Colorize;
use cvlab_core::audit::{audit, AuditReport};
use serde_json::json;
use std::fs;
use std::path::Path;

pub fn run(ctx: &Context, template: &Path, json: bool) -> Result<()> {
    let path = ctx.resolve(template);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;

    let report = audit(&source)?;

    if json {
        print_json(&json!({
            "template": path.display().to_string(),
            "coverage": report.coverage(),
            "report": report,
        }))
    } else {
        render_human(&report, ctx.verbose);
        Ok(())
    }
}

fn render_human(report: &AuditReport, verbose: bool) {
    for category in &report.categories {
        let expected = category.found.len() + category.missing.len();
        let icon = if category.missing.is_empty() {
            "✓".green()
        } else if category.found.is_empty() {
            "✗".red()
        } else {
            "→".cyan()
        };
        println!(
            "{} {} [{}/{}]",
            icon,
            category.label,
            category.found.len(),
            expected
        );

        if verbose {
            for name in &category.found {
                println!("  + {}", name);
            }
        }
        for name in &category.missing {
            println!("  - {}", name);
        }
    }

    if !report.unknown.is_empty() {
        println!(
            "\n{} Unknown variables: {}",
            "!".yellow(),
            report.unknown.join(", ")
        );
    }
    for warning in &report.warnings {
        println!("{} {}", "!".yellow(), warning);
    }

    println!(
        "\nCoverage: {:.1}% ({}/{})",
        report.coverage(),
        report.found,
        report.total
    );
}
