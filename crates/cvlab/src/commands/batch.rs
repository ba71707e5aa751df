//! Batch command - render every template of a store

use crate::context::Context;
use crate::output::print_json;
use anyhow::{Context as _, Result};
use colored::Colorize;
use cvlab_core::batch::{BatchReport, BatchRenderer};
use cvlab_core::config::BatchConfig;
use cvlab_core::resume::sample_cv;
use cvlab_core::store::open_store;
use cvlab_core::{build_context, Engine};
use std::path::PathBuf;

/// Render all templates of the store with the sample resume
///
/// # Exit Code
///
/// Fails only when the store cannot be opened or the output directory
/// cannot be created. Failing templates are listed in the report.
pub fn run(ctx: &Context, store: Option<PathBuf>, out: Option<PathBuf>, json: bool) -> Result<()> {
    let store_path = ctx.resolve(store.as_deref().unwrap_or(ctx.config.store.path.as_path()));
    let output_dir = ctx.resolve(out.as_deref().unwrap_or(ctx.config.batch.output_dir.as_path()));

    let store = open_store(&store_path)
        .with_context(|| format!("Failed to open template store {}", store_path.display()))?;

    let config = BatchConfig {
        output_dir,
        ..ctx.config.batch.clone()
    };
    let renderer = BatchRenderer::from_config(Engine::new(), &config);

    if !json {
        println!(
            "{} Rendering templates from {}",
            "→".cyan(),
            store_path.display()
        );
    }

    let report = renderer.run(store.as_ref(), &build_context(&sample_cv()))?;

    if json {
        print_json(&report)
    } else {
        render_human(&report);
        Ok(())
    }
}

fn render_human(report: &BatchReport) {
    for outcome in &report.outcomes {
        match (&outcome.file, &outcome.error) {
            (Some(file), _) => println!("{} {} → {}", "✓".green(), outcome.template_name, file),
            (None, error) => println!(
                "{} {}: {}",
                "✗".red(),
                outcome.template_name,
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let summary = format!(
        "{} rendered, {} failed in {} ms",
        report.succeeded(),
        report.failed(),
        report.duration_ms
    );
    if report.failed() == 0 {
        println!("\n{} {}", "✓".green(), summary);
    } else {
        println!("\n{} {}", "!".yellow(), summary);
    }
    println!("  Output: {}", report.output_dir.display());
}
