//! The data-source seam the paginator queries through.
//!
//! The paginator never executes queries itself. It composes a [`Query`]
//! (range predicate, ordering, slice and projection) and hands it to a
//! [`DataSource`], which is expected to run it against an index matching
//! the ordering fields.

mod predicate;
mod query;

pub use predicate::{Comparison, Filter, RangePredicate};
pub use query::Query;

use crate::Result;
use crate::ordering::FieldPath;

/// An ordered, filterable, sliceable collection of records.
///
/// Implementations own storage, indexing and execution. Locking, connection
/// pooling and query timeouts are the implementation's concern as well.
pub trait DataSource {
    /// The record type produced by this source.
    type Record;

    /// Executes the query and returns the matching records in order.
    fn query(&self, query: &Query) -> Result<Vec<Self::Record>>;

    /// Counts every record of the unfiltered source.
    fn count(&self) -> Result<u64>;
}

impl<S: DataSource + ?Sized> DataSource for &S {
    type Record = S::Record;

    fn query(&self, query: &Query) -> Result<Vec<Self::Record>> {
        (**self).query(query)
    }

    fn count(&self) -> Result<u64> {
        (**self).count()
    }
}

/// Resolves the string form of a (possibly dotted) field on a record.
///
/// Errors are propagated as-is by the token codec, so a resolver should
/// return a [`Resolution`] error when the path does not exist.
///
/// [`Resolution`]: crate::ErrorKind::Resolution
pub trait FieldResolver<R: ?Sized> {
    /// Returns the string representation of the field at `path`.
    fn resolve(&self, record: &R, path: &FieldPath) -> Result<String>;
}

impl<R: ?Sized, F> FieldResolver<R> for F
where
    F: Fn(&R, &FieldPath) -> Result<String>,
{
    fn resolve(&self, record: &R, path: &FieldPath) -> Result<String> {
        self(record, path)
    }
}
