//! Render command - translate, compile and execute one template

use crate::context::Context;
use crate::output::print_text;
use anyhow::{Context as _, Result};
use colored::Colorize;
use cvlab_core::document::{wrap_document, PageSettings};
use cvlab_core::resume::sample_cv;
use cvlab_core::{build_context, CvData, Engine};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub struct RenderArgs {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
    pub context: Option<PathBuf>,
    pub css: Option<PathBuf>,
    pub document: bool,
    pub output: Option<PathBuf>,
}

/// Render a template against resume data, a raw context or the sample resume
pub fn run(ctx: &Context, args: RenderArgs) -> Result<()> {
    let template = read(ctx, &args.template, "template")?;
    let context = load_context(ctx, &args)?;

    let mut html = Engine::new().render(&template, &context)?;

    if args.document {
        let css = match &args.css {
            Some(path) => read(ctx, path, "stylesheet")?,
            None => String::new(),
        };
        html = wrap_document(&html, &css, &PageSettings::from(&ctx.config.batch));
    }

    match &args.output {
        Some(path) => {
            let path = ctx.resolve(path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Wrote {}", "✓".green(), path.display());
        }
        None => print_text(&html)?,
    }

    Ok(())
}

fn load_context(ctx: &Context, args: &RenderArgs) -> Result<Value> {
    if let Some(path) = &args.context {
        let content = read(ctx, path, "context")?;
        return serde_json::from_str(&content)
            .with_context(|| format!("Invalid context JSON in {}", path.display()));
    }

    let cv = match &args.data {
        Some(path) => CvData::from_file(ctx.resolve(path))?,
        None => {
            if ctx.verbose {
                eprintln!("{} No data given, using the sample resume", "→".cyan());
            }
            sample_cv()
        }
    };
    Ok(build_context(&cv))
}

fn read(ctx: &Context, path: &Path, what: &str) -> Result<String> {
    let path = ctx.resolve(path);
    fs::read_to_string(&path).with_context(|| format!("Failed to read {} {}", what, path.display()))
}
