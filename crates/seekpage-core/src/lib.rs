#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for page fetches.
///
/// Use this target for logging page queries, lookahead trimming and backward
/// lookups.
pub const TRACING_TARGET_FETCH: &str = "seekpage_core::fetch";

/// Tracing target for token encoding and decoding.
pub const TRACING_TARGET_CODEC: &str = "seekpage_core::codec";

/// Tracing target for the in-memory data source.
pub const TRACING_TARGET_SOURCE: &str = "seekpage_core::source";

mod error;
#[cfg(test)]
mod fixtures;

pub mod memory;
pub mod ordering;
pub mod paginator;
pub mod source;
pub mod token;

pub use error::{BoxedError, Error, ErrorKind, Result};

pub use crate::memory::{JsonResolver, MemorySource};
pub use crate::ordering::{FieldPath, OrderField, Ordering, SortOrder};
pub use crate::paginator::{Page, Paginator, PaginatorConfig};
pub use crate::source::{DataSource, FieldResolver, Query, RangePredicate};
pub use crate::token::{CursorMode, PageRequest, PageToken, TokenCodec};
