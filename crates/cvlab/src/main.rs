mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::Context;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = Context::new(cli.config.as_deref(), cli.verbose).and_then(|ctx| {
        match cli.command {
            Commands::Translate { template, json } => {
                commands::translate::run(&ctx, &template, json)
            }
            Commands::Render {
                template,
                data,
                context,
                css,
                document,
                output,
            } => commands::render::run(
                &ctx,
                commands::render::RenderArgs {
                    template,
                    data,
                    context,
                    css,
                    document,
                    output,
                },
            ),
            Commands::Batch { store, out, json } => commands::batch::run(&ctx, store, out, json),
            Commands::Audit { template, json } => commands::audit::run(&ctx, &template, json),
            Commands::Sample { context } => commands::sample::run(context),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
