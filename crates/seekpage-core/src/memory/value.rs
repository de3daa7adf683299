//! Field lookup and comparison rules for JSON records.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::ordering::FieldPath;
use crate::source::Filter;
use crate::{Error, Result};

static NULL: Value = Value::Null;

/// Follows `path` through nested objects.
///
/// Returns `None` when a hop is missing or is not an object.
pub(crate) fn lookup<'a>(record: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments()
        .try_fold(record, |value, segment| value.as_object()?.get(segment))
}

/// Returns the string form used inside tokens.
///
/// Strings are taken verbatim, everything else uses its JSON form.
pub(crate) fn to_token_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Token segment standing for a JSON `null` field.
///
/// A string field holding the literal text `null` is indistinguishable from
/// a null one once encoded.
const NULL_TOKEN: &str = "null";

/// Evaluates one filter clause against a record.
///
/// Missing and null fields compare as null, which orders before every other
/// value as in [`compare_values`].
pub(crate) fn matches_filter(record: &Value, filter: &Filter) -> Result<bool> {
    let value = lookup(record, &filter.field).unwrap_or(&NULL);

    let ordering = compare_with_token(value, &filter.value).map_err(|error| {
        error.with_message(format!(
            "cannot compare '{}' with field '{}' ({})",
            filter.value,
            filter.field,
            type_name(value)
        ))
    })?;

    Ok(ordering.is_some_and(|ordering| filter.comparison.matches(ordering)))
}

/// Compares a record value with a token segment coerced to its type.
fn compare_with_token(value: &Value, token: &str) -> Result<Option<Ordering>> {
    if token == NULL_TOKEN {
        return Ok(Some(type_rank(value).cmp(&type_rank(&NULL))));
    }

    let ordering = match value {
        Value::Null => Some(Ordering::Less),
        Value::Bool(b) => Some(b.cmp(&token.parse::<bool>().map_err(invalid_value)?)),
        Value::Number(n) => match (n.as_i64(), token.parse::<i64>()) {
            (Some(lhs), Ok(rhs)) => Some(lhs.cmp(&rhs)),
            _ => {
                let rhs = token.parse::<f64>().map_err(invalid_value)?;
                n.as_f64().and_then(|lhs| lhs.partial_cmp(&rhs))
            }
        },
        Value::String(s) => Some(s.as_str().cmp(token)),
        other => Some(other.to_string().as_str().cmp(token)),
    };

    Ok(ordering)
}

/// Total order over optional JSON values used for sorting.
///
/// Values of different types are ordered by type: missing and null first,
/// then booleans, numbers, strings, arrays and objects.
pub(crate) fn compare_values(lhs: Option<&Value>, rhs: Option<&Value>) -> Ordering {
    let lhs = lhs.unwrap_or(&NULL);
    let rhs = rhs.unwrap_or(&NULL);

    match (lhs, rhs) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        },
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            lhs.to_string().cmp(&rhs.to_string())
        }
        _ => type_rank(lhs).cmp(&type_rank(rhs)),
    }
}

/// Copies only the given paths of `record` into a new object.
pub(crate) fn project(record: &Value, paths: &[FieldPath]) -> Value {
    let mut projected = Map::new();

    for path in paths {
        if let Some(value) = lookup(record, path) {
            let segments: Vec<&str> = path.segments().collect();
            insert_path(&mut projected, &segments, value.clone());
        }
    }

    Value::Object(projected)
}

fn insert_path(target: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [field] => {
            target.insert((*field).to_owned(), value);
        }
        [hop, rest @ ..] => {
            let entry = target
                .entry((*hop).to_owned())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(nested) = entry {
                insert_path(nested, rest, value);
            }
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid_value(error: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::invalid_token().with_source(error)
}
