use serde::{Deserialize, Serialize};

use super::RangePredicate;
use crate::ordering::{FieldPath, Ordering};

/// A single query issued against a [`DataSource`].
///
/// Sources apply the parts in this order: predicate, ordering, offset,
/// limit, projection.
///
/// [`DataSource`]: super::DataSource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Records must match this predicate.
    pub predicate: RangePredicate,
    /// Sort order of the returned records.
    pub ordering: Ordering,
    /// Number of leading records to skip.
    #[serde(default)]
    pub offset: usize,
    /// Maximum number of records to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Restricts the returned records to these fields when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Vec<FieldPath>>,
}

impl Query {
    /// Creates an unbounded query sorted by `ordering`.
    pub fn new(ordering: Ordering) -> Self {
        Self {
            predicate: RangePredicate::all(),
            ordering,
            offset: 0,
            limit: None,
            projection: None,
        }
    }

    /// Restricts the query to records matching `predicate`.
    pub fn with_predicate(mut self, predicate: RangePredicate) -> Self {
        self.predicate = predicate;
        self
    }

    /// Skips the first `offset` records.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Returns at most `limit` records.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Selects only the given fields.
    pub fn with_projection(mut self, fields: impl IntoIterator<Item = FieldPath>) -> Self {
        self.projection = Some(fields.into_iter().collect());
        self
    }
}
