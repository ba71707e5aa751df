//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cvlab")]
#[command(version, about = "Resume template translation and rendering", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to cvlab.toml (defaults to ./cvlab.toml when present)
    #[arg(long, global = true, env = "CVLAB_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a legacy template into the canonical dialect
    Translate {
        /// Template file
        template: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a template against resume data
    Render {
        /// Template file
        template: PathBuf,

        /// Resume data in the editor's JSON shape
        #[arg(long, conflicts_with = "context")]
        data: Option<PathBuf>,

        /// Prebuilt render context as JSON
        #[arg(long)]
        context: Option<PathBuf>,

        /// Stylesheet to embed in the document shell
        #[arg(long, requires = "document")]
        css: Option<PathBuf>,

        /// Wrap the fragment in a full HTML document
        #[arg(long)]
        document: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every template of a store with the sample resume
    Batch {
        /// Template store file or directory
        #[arg(long)]
        store: Option<PathBuf>,

        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report which context variables a template uses
    Audit {
        /// Template file
        template: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the sample resume as JSON
    Sample {
        /// Print the render context instead of the resume data
        #[arg(long)]
        context: bool,
    },
}
