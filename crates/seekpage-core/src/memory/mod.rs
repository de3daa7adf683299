//! In-memory data source over JSON records.
//!
//! [`MemorySource`] executes [`Query`]s by scanning a vector of
//! [`serde_json::Value`] records, and [`JsonResolver`] resolves dotted field
//! paths on them. Together they are a complete reference collaborator for
//! the paginator, used by the command-line browser and the tests.

mod value;

use std::io::Read;

use serde_json::Value;

use crate::ordering::FieldPath;
use crate::source::{DataSource, FieldResolver, Query};
use crate::{Error, Result, TRACING_TARGET_SOURCE};

/// Resolves dotted paths through nested JSON objects.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JsonResolver;

impl FieldResolver<Value> for JsonResolver {
    fn resolve(&self, record: &Value, path: &FieldPath) -> Result<String> {
        value::lookup(record, path)
            .map(value::to_token_string)
            .ok_or_else(|| {
                Error::resolution().with_message(format!("field '{path}' not found on record"))
            })
    }
}

/// A [`DataSource`] backed by a vector of JSON records.
///
/// Filter values are coerced to the type of the record's field: numbers
/// compare numerically, booleans parse from `true`/`false` and everything
/// else compares as strings. Sorting is stable.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemorySource {
    records: Vec<Value>,
}

impl MemorySource {
    /// Creates a source holding `records`.
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Parses either a JSON array of records or one record per line.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let trimmed = input.trim_start();
        if trimmed.starts_with('[') {
            let records: Vec<Value> = serde_json::from_str(trimmed)?;
            return Ok(Self::new(records));
        }

        let records = serde_json::Deserializer::from_str(input)
            .into_iter::<Value>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(records))
    }

    /// Reads records from `reader`, see [`MemorySource::from_json_str`].
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input).map_err(|error| {
            Error::serialization()
                .with_message("failed to read records")
                .with_source(error)
        })?;

        Self::from_json_str(&input)
    }

    /// Returns every record in insertion order.
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record.
    pub fn push(&mut self, record: Value) {
        self.records.push(record);
    }
}

impl FromIterator<Value> for MemorySource {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DataSource for MemorySource {
    type Record = Value;

    fn query(&self, query: &Query) -> Result<Vec<Value>> {
        let mut matched = Vec::new();
        for record in &self.records {
            if query
                .predicate
                .evaluate(|filter| value::matches_filter(record, filter))?
            {
                matched.push(record);
            }
        }

        matched.sort_by(|lhs, rhs| {
            query
                .ordering
                .iter()
                .map(|field| {
                    let ordering = value::compare_values(
                        value::lookup(lhs, field.path()),
                        value::lookup(rhs, field.path()),
                    );
                    if field.is_desc() {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total = matched.len();
        let window = matched
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX));

        let records: Vec<Value> = match &query.projection {
            Some(paths) => window.map(|record| value::project(record, paths)).collect(),
            None => window.cloned().collect(),
        };

        tracing::debug!(
            target: TRACING_TARGET_SOURCE,
            predicate = %query.predicate,
            ordering = %query.ordering,
            offset = query.offset,
            limit = ?query.limit,
            matched = total,
            returned = records.len(),
            "executed in-memory query"
        );

        Ok(records)
    }

    fn count(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::fixtures::{ids, simple_source};
    use crate::ordering::Ordering;
    use crate::source::{Comparison, Filter, RangePredicate};

    #[test]
    fn resolver_reports_missing_fields() {
        let record = json!({ "id": 1 });
        assert_eq!(JsonResolver.resolve(&record, &"id".into()).unwrap(), "1");

        let err = JsonResolver
            .resolve(&record, &"simple.name".into())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[test]
    fn parse_array_and_lines() {
        let source = MemorySource::from_json_str(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert_eq!(source.len(), 2);

        let source = MemorySource::from_json_str("{\"id\":1}\n{\"id\":2}\n\n{\"id\":3}\n").unwrap();
        assert_eq!(ids(source.records()), [1, 2, 3]);

        let err = MemorySource::from_json_str("{\"id\":").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);

        assert!(MemorySource::from_json_str("").unwrap().is_empty());
    }

    #[test]
    fn query_filters_sorts_and_slices() {
        let source = simple_source(33);
        let predicate = RangePredicate::conjunction(vec![Filter::new(
            "id".into(),
            Comparison::Lt,
            "11",
        )]);
        let query = Query::new(Ordering::default().reversed())
            .with_predicate(predicate)
            .with_offset(2)
            .with_limit(3);

        let records = source.query(&query).unwrap();
        assert_eq!(ids(&records), [8, 7, 6]);
    }

    #[test]
    fn query_past_the_end_is_empty() {
        let source = simple_source(5);
        let query = Query::new(Ordering::default()).with_offset(10).with_limit(1);
        assert!(source.query(&query).unwrap().is_empty());
    }

    #[test]
    fn query_projects_fields() {
        let source = simple_source(3);
        let query = Query::new(Ordering::default())
            .with_limit(1)
            .with_projection([FieldPath::from("id")]);

        let records = source.query(&query).unwrap();
        assert_eq!(records, [json!({ "id": 1 })]);
    }

    #[test]
    fn sort_is_stable_and_multi_field() {
        let source: MemorySource = [
            json!({ "id": 1, "group": "b" }),
            json!({ "id": 2, "group": "a" }),
            json!({ "id": 3, "group": "b" }),
            json!({ "id": 4, "group": "a" }),
        ]
        .into_iter()
        .collect();

        let query = Query::new("group,-id".parse().unwrap());
        assert_eq!(ids(&source.query(&query).unwrap()), [4, 2, 3, 1]);

        let query = Query::new("group".parse().unwrap());
        assert_eq!(ids(&source.query(&query).unwrap()), [2, 4, 1, 3]);
    }

    #[test]
    fn count_ignores_predicates() {
        assert_eq!(simple_source(33).count().unwrap(), 33);
        assert_eq!(MemorySource::default().count().unwrap(), 0);
    }
}
