#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod browse;
mod config;

use std::io::{self, BufWriter};
use std::process;

use anyhow::Context;
use seekpage_core::Paginator;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "seekpage_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "seekpage_cli::config";
pub const TRACING_TARGET_BROWSE: &str = "seekpage_cli::browse";

fn main() {
    let Err(error) = run() else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %format!("{error:#}"),
            "seekpage terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate()?;

    let source = cli.input.load()?;
    let paginator =
        Paginator::json(source, cli.paginator).context("failed to create paginator")?;

    let stdout = io::stdout();
    browse::browse(&paginator, &cli.browse, BufWriter::new(stdout.lock()))?;

    Ok(())
}
