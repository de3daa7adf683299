use serde::{Deserialize, Serialize};

use super::PageToken;
use crate::ordering::{OrderField, Ordering};
use crate::source::{Comparison, FieldResolver, Filter, RangePredicate};
use crate::{Error, Result, TRACING_TARGET_CODEC};

/// Separator between field values inside a token.
///
/// Values are not escaped: a value whose string form contains the separator
/// produces a token that no longer decodes.
pub const TOKEN_SEPARATOR: char = ':';

/// How a token is turned into a range predicate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// Every ordering field is compared against its captured value on its
    /// own, and all comparisons must hold.
    ///
    /// This is exact for single-field orderings. With compound orderings it
    /// skips records that tie on a leading field, so the leading fields
    /// should be unique on their own.
    #[default]
    Independent,
    /// True "next tuple after" comparison:
    /// `f1 > v1 OR (f1 = v1 AND f2 > v2) OR ...`.
    Lexicographic,
}

/// Converts records into tokens and tokens into range predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCodec {
    ordering: Ordering,
    mode: CursorMode,
}

impl TokenCodec {
    /// Creates a codec for the given forward ordering.
    pub fn new(ordering: Ordering, mode: CursorMode) -> Self {
        Self { ordering, mode }
    }

    /// Returns the forward ordering the codec encodes.
    pub fn ordering(&self) -> &Ordering {
        &self.ordering
    }

    /// Returns the cursor mode.
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// Encodes the position of `record` in the ordering.
    ///
    /// Resolution errors from `resolver` are returned unchanged.
    pub fn encode<R, F>(&self, record: &R, resolver: &F) -> Result<String>
    where
        R: ?Sized,
        F: FieldResolver<R> + ?Sized,
    {
        let values = self
            .ordering
            .paths()
            .map(|path| resolver.resolve(record, path))
            .collect::<Result<Vec<_>>>()?;

        let separator = TOKEN_SEPARATOR.to_string();
        Ok(values.join(&separator))
    }

    /// Decodes `token` into the predicate selecting the records after it.
    ///
    /// With `reversed` set, the predicate selects the records before it
    /// instead. The empty token decodes to a predicate that matches
    /// everything.
    pub fn decode(&self, token: &str, reversed: bool) -> Result<RangePredicate> {
        if token.is_empty() {
            return Ok(RangePredicate::all());
        }

        let values = self.split(token)?;
        let predicate = match self.mode {
            CursorMode::Independent => RangePredicate::conjunction(
                self.ordering
                    .iter()
                    .zip(&values)
                    .map(|(field, value)| range_filter(field, value, reversed))
                    .collect(),
            ),
            CursorMode::Lexicographic => {
                let branches = (0..values.len())
                    .map(|i| {
                        let mut branch: Vec<Filter> = self.ordering[..i]
                            .iter()
                            .zip(&values)
                            .map(|(field, value)| {
                                Filter::new(field.path().clone(), Comparison::Eq, *value)
                            })
                            .collect();
                        branch.push(range_filter(&self.ordering[i], values[i], reversed));
                        branch
                    })
                    .collect();
                RangePredicate::disjunction(branches)
            }
        };

        tracing::trace!(
            target: TRACING_TARGET_CODEC,
            token,
            reversed,
            mode = ?self.mode,
            predicate = %predicate,
            "decoded token"
        );

        Ok(predicate)
    }

    /// Checks that `token` fits the ordering.
    ///
    /// Absent and boundary tokens are always valid; a token value must have
    /// exactly one segment per ordering field.
    pub fn validate(&self, token: &PageToken) -> Result<()> {
        match token.value() {
            Some(value) => self.split(value).map(drop),
            None => Ok(()),
        }
    }

    fn split<'a>(&self, token: &'a str) -> Result<Vec<&'a str>> {
        let values: Vec<&str> = token.split(TOKEN_SEPARATOR).collect();
        if values.len() != self.ordering.len() {
            return Err(Error::invalid_token().with_message(format!(
                "expected {} segment(s) for ordering '{}', found {}",
                self.ordering.len(),
                self.ordering,
                values.len()
            )));
        }

        Ok(values)
    }
}

/// Builds the strict inequality for one field.
///
/// Ascending fields continue with greater values going forward, descending
/// fields with smaller ones; `reversed` flips both.
fn range_filter(field: &OrderField, value: &str, reversed: bool) -> Filter {
    let comparison = match (field.is_asc(), reversed) {
        (true, false) | (false, true) => Comparison::Gt,
        (true, true) | (false, false) => Comparison::Lt,
    };

    Filter::new(field.path().clone(), comparison, value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::memory::JsonResolver;
    use crate::ordering::FieldPath;

    fn codec_for(ordering: &str, mode: CursorMode) -> TokenCodec {
        TokenCodec::new(ordering.parse().unwrap(), mode)
    }

    fn filter(field: &str, comparison: Comparison, value: &str) -> Filter {
        Filter::new(FieldPath::from(field), comparison, value)
    }

    #[test]
    fn encode_joins_fields_in_order() {
        let record = json!({ "id": 25, "name": "object 24" });
        let codec = codec_for("id,name", CursorMode::Independent);
        let token = codec.encode(&record, &JsonResolver).unwrap();
        assert_eq!(token, "25:object 24");
    }

    #[test]
    fn encode_follows_relationships() {
        let record = json!({ "id": 3, "simple": { "name": "object 0" } });
        let codec = codec_for("simple.name,-id", CursorMode::Independent);
        let token = codec.encode(&record, &JsonResolver).unwrap();
        assert_eq!(token, "object 0:3");
    }

    #[test]
    fn encode_propagates_resolution_errors() {
        let record = json!({ "id": 3 });
        let codec = codec_for("simple.name", CursorMode::Independent);
        let err = codec.encode(&record, &JsonResolver).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[test]
    fn encode_accepts_closure_resolvers() {
        struct Row {
            id: u32,
            name: String,
        }

        let resolver = |row: &Row, path: &FieldPath| match path.as_str() {
            "id" => Ok(row.id.to_string()),
            "name" => Ok(row.name.clone()),
            other => Err(Error::resolution().with_message(other.to_string())),
        };

        let row = Row {
            id: 4,
            name: "d".into(),
        };
        let codec = codec_for("name,id", CursorMode::Independent);
        assert_eq!(codec.encode(&row, &resolver).unwrap(), "d:4");
    }

    #[test]
    fn decode_ascending_and_descending() {
        let codec = codec_for("id,-name", CursorMode::Independent);

        let forward = codec.decode("25:b", false).unwrap();
        assert_eq!(
            forward,
            RangePredicate::conjunction(vec![
                filter("id", Comparison::Gt, "25"),
                filter("name", Comparison::Lt, "b"),
            ])
        );

        let backward = codec.decode("25:b", true).unwrap();
        assert_eq!(
            backward,
            RangePredicate::conjunction(vec![
                filter("id", Comparison::Lt, "25"),
                filter("name", Comparison::Gt, "b"),
            ])
        );
    }

    #[test]
    fn decode_lexicographic() {
        let codec = codec_for("name,id", CursorMode::Lexicographic);
        let predicate = codec.decode("b:7", false).unwrap();
        assert_eq!(
            predicate,
            RangePredicate::disjunction(vec![
                vec![filter("name", Comparison::Gt, "b")],
                vec![
                    filter("name", Comparison::Eq, "b"),
                    filter("id", Comparison::Gt, "7"),
                ],
            ])
        );
    }

    #[test]
    fn decode_empty_token_is_unbounded() {
        let codec = codec_for("name,id,third", CursorMode::Independent);
        assert!(codec.decode("", false).unwrap().is_unbounded());
        assert!(codec.decode("", true).unwrap().is_unbounded());
    }

    #[test]
    fn decode_rejects_segment_mismatch() {
        let codec = codec_for("id", CursorMode::Independent);
        let err = codec.decode("a:b", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidToken);

        let codec = codec_for("name,sub_name,third", CursorMode::Independent);
        assert!(codec.decode("a:b", false).is_err());
        assert!(codec.decode("a:b:c", false).is_ok());
    }

    #[test]
    fn validate_tokens() {
        let codec = codec_for("id", CursorMode::Independent);
        for valid in ["42", "1", "-1", "something"] {
            assert!(codec.validate(&PageToken::new(valid)).is_ok(), "{valid}");
        }
        assert!(codec.validate(&PageToken::Absent).is_ok());
        assert!(codec.validate(&PageToken::Boundary).is_ok());
        for invalid in ["a:b", "a:b:c", "a:b:"] {
            assert!(codec.validate(&PageToken::new(invalid)).is_err(), "{invalid}");
        }

        let codec = codec_for("name,sub_name,third", CursorMode::Independent);
        assert!(codec.validate(&PageToken::Absent).is_ok());
        assert!(codec.validate(&PageToken::new("a:b:c")).is_ok());
        assert!(codec.validate(&PageToken::Boundary).is_ok());
        assert!(codec.validate(&PageToken::new("a")).is_err());
        assert!(codec.validate(&PageToken::new("a:b")).is_err());
    }

    #[test]
    fn separator_in_values_breaks_decoding() {
        let record = json!({ "id": "a:b" });
        let codec = codec_for("id", CursorMode::Independent);
        let token = codec.encode(&record, &JsonResolver).unwrap();
        assert_eq!(token, "a:b");
        assert!(codec.decode(&token, false).is_err());
    }
}
