mod cli;
mod commands;
mod header;
mod model;
mod toc;
mod util;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if show_usage_without_input(&cli)? {
        return Ok(());
    }

    commands::generate::run(cli)
}

/// Prints usage to stdout when no input file was given.
fn show_usage_without_input(cli: &Cli) -> Result<bool> {
    if cli.input.is_some() {
        return Ok(false);
    }

    Cli::command()
        .print_help()
        .context("failed to print usage")?;
    println!();
    Ok(true)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
