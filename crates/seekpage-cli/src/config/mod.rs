//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── input: InputConfig           # Records file or standard input
//! ├── browse: BrowseConfig         # Token, page walking, output format
//! └── paginator: PaginatorConfig   # Page size, ordering, count, cursor mode
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! seekpage --input records.json --ordering "simple.name,-id" --per-page 10
//!
//! # Or via environment variables
//! SEEKPAGE_INPUT=records.json SEEKPAGE_PER_PAGE=10 seekpage
//! ```

mod browse;
mod input;

use std::process;

use anyhow::Context;
pub use browse::BrowseConfig;
use clap::Parser;
pub use input::InputConfig;
use seekpage_core::PaginatorConfig;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "seekpage")]
#[command(about = "Browse JSON records page by page with keyset tokens")]
#[command(version)]
pub struct Cli {
    /// Where records are read from.
    #[clap(flatten)]
    pub input: InputConfig,

    /// Which pages are printed.
    #[clap(flatten)]
    pub browse: BrowseConfig,

    /// Page size, ordering and token behavior.
    #[clap(flatten)]
    pub paginator: PaginatorConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs go to standard error so that standard output only carries pages.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.input
            .validate()
            .context("invalid input configuration")?;
        self.browse
            .validate()
            .context("invalid browse configuration")?;
        self.paginator
            .validate()
            .context("invalid paginator configuration")?;
        Ok(())
    }

    /// Logs configuration at info level.
    pub fn log(&self) {
        Self::log_build_info();
        self.input.log();
        self.browse.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            per_page = self.paginator.per_page,
            ordering = %self.paginator.ordering,
            allow_count = self.paginator.allow_count,
            cursor_mode = ?self.paginator.cursor_mode,
            "paginator configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
