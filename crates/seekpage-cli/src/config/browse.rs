//! Page selection and output configuration.

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use seekpage_core::PageToken;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Which pages to print and how.
///
/// # Examples
///
/// ```bash
/// # First page
/// seekpage --input records.json
///
/// # The page after the record with id 25
/// seekpage --input records.json --token 25
///
/// # Every page from the start, one JSON document per line
/// seekpage --input records.json --all
/// ```
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct BrowseConfig {
    /// Token of the page to fetch, an empty string for the boundary token
    #[arg(short, long)]
    #[serde(default)]
    pub token: Option<String>,

    /// Keep fetching pages until the last one
    #[arg(short, long)]
    #[serde(default)]
    pub all: bool,

    /// Stop after this many pages when walking with `--all`
    #[arg(long, requires = "all")]
    #[serde(default)]
    pub max_pages: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    #[serde(default)]
    pub pretty: bool,
}

impl BrowseConfig {
    /// Validates the page selection.
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.max_pages == Some(0) {
            return Err(anyhow!("Max pages must be at least 1."));
        }

        Ok(())
    }

    /// Returns the token of the first page to fetch.
    pub fn start_token(&self) -> PageToken {
        self.token.clone().into()
    }

    /// Logs the browse configuration.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            token = %self.start_token(),
            all = self.all,
            max_pages = ?self.max_pages,
            pretty = self.pretty,
            "browse configuration"
        );
    }
}
