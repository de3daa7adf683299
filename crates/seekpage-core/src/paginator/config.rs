//! Paginator configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::ordering::Ordering;
use crate::token::CursorMode;
use crate::{Error, Result};

/// Page size used when none is configured.
pub const DEFAULT_PER_PAGE: usize = 25;

/// Settings for a [`Paginator`].
///
/// With the `config` feature enabled the struct doubles as a set of
/// command-line arguments with `SEEKPAGE_*` environment fallbacks.
///
/// [`Paginator`]: crate::Paginator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "configs do nothing unless passed to a paginator"]
pub struct PaginatorConfig {
    /// Number of records per page
    #[cfg_attr(
        feature = "config",
        arg(long, env = "SEEKPAGE_PER_PAGE", default_value_t = DEFAULT_PER_PAGE)
    )]
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Comma separated fields to order by, `-` prefix for descending
    #[cfg_attr(
        feature = "config",
        arg(long, env = "SEEKPAGE_ORDERING", default_value_t = Ordering::default())
    )]
    #[serde(default)]
    pub ordering: Ordering,

    /// Allow counting the records of the source
    #[cfg_attr(feature = "config", arg(long, env = "SEEKPAGE_ALLOW_COUNT"))]
    #[serde(default)]
    pub allow_count: bool,

    /// How tokens of compound orderings are compared
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "SEEKPAGE_CURSOR_MODE",
            value_enum,
            default_value_t = CursorMode::default()
        )
    )]
    #[serde(default)]
    pub cursor_mode: CursorMode,

    /// Accepted for compatibility with page-number paginators; keyset pages
    /// ignore it.
    #[cfg_attr(feature = "config", arg(skip = true))]
    #[serde(default = "default_allow_empty_first_page")]
    pub allow_empty_first_page: bool,

    /// Accepted for compatibility with page-number paginators; keyset pages
    /// ignore it.
    #[cfg_attr(feature = "config", arg(skip))]
    #[serde(default)]
    pub orphans: usize,
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

fn default_allow_empty_first_page() -> bool {
    true
}

impl PaginatorConfig {
    /// Creates a configuration with the given page size and defaults
    /// everywhere else.
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page,
            ..Self::default()
        }
    }

    /// Sets the page size.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the ordering.
    pub fn with_ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Enables [`Paginator::count`].
    ///
    /// [`Paginator::count`]: crate::Paginator::count
    pub fn with_count(mut self) -> Self {
        self.allow_count = true;
        self
    }

    /// Sets the cursor mode.
    pub fn with_cursor_mode(mut self, cursor_mode: CursorMode) -> Self {
        self.cursor_mode = cursor_mode;
        self
    }

    /// Checks the configuration for values no paginator can work with.
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(Error::invalid_config().with_message("per_page must be at least 1"));
        }

        Ok(())
    }
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            ordering: Ordering::default(),
            allow_count: false,
            cursor_mode: CursorMode::default(),
            allow_empty_first_page: true,
            orphans: 0,
        }
    }
}
