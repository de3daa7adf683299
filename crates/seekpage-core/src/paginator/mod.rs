//! Keyset paginator.
//!
//! A [`Paginator`] turns a [`PageRequest`] into a [`Page`] by running at most
//! two queries against its [`DataSource`]:
//!
//! 1. the page itself, ordered forward and limited to `per_page + 1` records
//!    so that the extra record reveals whether a next page exists, and
//! 2. a backward lookup (only for token values) that walks the reversed
//!    ordering to find the token of the preceding page.
//!
//! No state is kept between calls; everything needed to continue lives in
//! the tokens.

mod config;
mod page;

pub use config::{DEFAULT_PER_PAGE, PaginatorConfig};
pub use page::Page;
use serde_json::Value;

use crate::memory::JsonResolver;
use crate::ordering::Ordering;
use crate::source::{DataSource, FieldResolver, Query};
use crate::token::{PageRequest, PageToken, TokenCodec};
use crate::{Result, TRACING_TARGET_FETCH};

/// Fetches pages of records from a [`DataSource`] using keyset tokens.
///
/// `Paginator` is `Send + Sync` whenever its source and resolver are, so a
/// single instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Paginator<S, F = JsonResolver> {
    source: S,
    resolver: F,
    config: PaginatorConfig,
    codec: TokenCodec,
    reversed: Ordering,
}

impl<S, F> Paginator<S, F>
where
    S: DataSource,
    F: FieldResolver<S::Record>,
{
    /// Creates a paginator over `source`.
    ///
    /// Returns an [`InvalidConfig`] error when the configuration does not
    /// validate.
    ///
    /// [`InvalidConfig`]: crate::ErrorKind::InvalidConfig
    pub fn new(source: S, resolver: F, config: PaginatorConfig) -> Result<Self> {
        config.validate()?;

        let codec = TokenCodec::new(config.ordering.clone(), config.cursor_mode);
        let reversed = config.ordering.reversed();

        tracing::debug!(
            target: TRACING_TARGET_FETCH,
            per_page = config.per_page,
            ordering = %config.ordering,
            cursor_mode = ?config.cursor_mode,
            allow_count = config.allow_count,
            "created paginator"
        );

        Ok(Self {
            source,
            resolver,
            config,
            codec,
            reversed,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Returns the underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the token codec built from the ordering.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Returns the configured page size.
    pub fn per_page(&self) -> usize {
        self.config.per_page
    }

    /// Returns the ordering pages are walked in.
    pub fn ordering(&self) -> &Ordering {
        &self.config.ordering
    }

    /// Counts every record of the source.
    ///
    /// Returns `None` unless counting was enabled with
    /// [`PaginatorConfig::with_count`].
    pub fn count(&self) -> Result<Option<u64>> {
        if !self.config.allow_count {
            return Ok(None);
        }

        let count = self.source.count()?;
        tracing::debug!(target: TRACING_TARGET_FETCH, count, "counted records");
        Ok(Some(count))
    }

    /// The token of the first page.
    pub fn default_page_number(&self) -> PageToken {
        PageToken::Absent
    }

    /// Checks that `token` fits the configured ordering.
    pub fn validate_token(&self, token: &PageToken) -> Result<()> {
        self.codec.validate(token)
    }

    /// Fetches the page identified by `request`.
    ///
    /// Accepts a [`PageToken`], anything convertible into one, or the page
    /// number `1`. Both an absent token and the boundary token fetch the
    /// first page.
    pub fn fetch(&self, request: impl Into<PageRequest>) -> Result<Page<S::Record>> {
        let token = request.into().into_token()?;
        let per_page = self.config.per_page;

        let mut query =
            Query::new(self.codec.ordering().clone()).with_limit(per_page.saturating_add(1));
        if let Some(value) = token.value() {
            query = query.with_predicate(self.codec.decode(value, false)?);
        }

        let mut records = self.source.query(&query)?;

        let mut next_token = PageToken::Absent;
        if records.len() > per_page {
            records.truncate(per_page);
            if let Some(last) = records.last() {
                next_token = PageToken::new(self.codec.encode(last, &self.resolver)?);
            }
        }

        let prev_token = match token.value() {
            Some(value) => self.previous_token(value)?,
            None => PageToken::Absent,
        };

        tracing::debug!(
            target: TRACING_TARGET_FETCH,
            token = %token,
            records = records.len(),
            next_token = %next_token,
            prev_token = %prev_token,
            "fetched page"
        );

        Ok(Page::new(records, token, next_token, prev_token))
    }

    /// Finds the token of the page before the one starting after `token`.
    ///
    /// Walks the reversed ordering from `token` and picks the record
    /// `per_page - 1` positions away. When there is no such record the
    /// preceding page is the first one, which the boundary token stands for.
    fn previous_token(&self, token: &str) -> Result<PageToken> {
        let query = Query::new(self.reversed.clone())
            .with_predicate(self.codec.decode(token, true)?)
            .with_offset(self.config.per_page - 1)
            .with_limit(1)
            .with_projection(self.codec.ordering().paths().cloned());

        let preceding = self.source.query(&query)?;
        let prev_token = match preceding.first() {
            Some(record) => PageToken::new(self.codec.encode(record, &self.resolver)?),
            None => PageToken::Boundary,
        };

        tracing::trace!(
            target: TRACING_TARGET_FETCH,
            token,
            prev_token = %prev_token,
            "resolved previous page"
        );

        Ok(prev_token)
    }
}

impl<S> Paginator<S, JsonResolver>
where
    S: DataSource<Record = Value>,
{
    /// Creates a paginator over JSON records resolved with [`JsonResolver`].
    pub fn json(source: S, config: PaginatorConfig) -> Result<Self> {
        Self::new(source, JsonResolver, config)
    }
}
