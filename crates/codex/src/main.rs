//! Codex CLI - static HTML site generator.
//!
//! Converts a tree of Markdown text files, organized as category folders
//! holding page files, into a navigable static HTML site:
//!
//! ```text
//! codex <SOURCE> <TARGET>
//! ```

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::BuildArgs;
use output::Output;

/// Codex - build a static HTML site from a directory of Markdown files.
#[derive(Parser)]
#[command(name = "codex", version, about)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.build.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.build.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&err);
            ExitCode::FAILURE
        }
    }
}
