//! Ordering specifications used as pagination boundaries.
//!
//! An [`Ordering`] is a non-empty list of [`OrderField`]s. Its textual form is
//! a comma separated list of field paths, each optionally prefixed by `-` for
//! descending order, e.g. `"simple.name,-id"`.

mod field;

use std::fmt;
use std::str::FromStr;

use derive_more::Deref;
pub use field::{FieldPath, OrderField, SortOrder};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Field used by [`Ordering::default`], the record's primary key.
pub const DEFAULT_ORDER_FIELD: &str = "id";

/// Separator between fields in the textual form of an ordering.
const FIELD_SEPARATOR: char = ',';

/// An ordered, non-empty list of sort fields.
///
/// The fields should collectively identify a record uniquely (typically by
/// ending with the primary key), otherwise two records may share a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Ordering(Vec<OrderField>);

impl Ordering {
    /// Creates an ordering from the given fields.
    ///
    /// Returns an [`InvalidConfig`] error when `fields` is empty.
    ///
    /// [`InvalidConfig`]: crate::ErrorKind::InvalidConfig
    pub fn new(fields: impl IntoIterator<Item = OrderField>) -> Result<Self> {
        let fields: Vec<OrderField> = fields.into_iter().collect();
        if fields.is_empty() {
            return Err(Error::invalid_config().with_message("ordering must not be empty"));
        }

        Ok(Self(fields))
    }

    /// Returns the same fields with every direction flipped.
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().map(OrderField::reversed).collect())
    }

    /// Iterates over the field paths, ignoring directions.
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.0.iter().map(OrderField::path)
    }

    /// Returns the fields as a slice.
    pub fn fields(&self) -> &[OrderField] {
        &self.0
    }
}

impl Default for Ordering {
    fn default() -> Self {
        Self(vec![OrderField::asc(DEFAULT_ORDER_FIELD)])
    }
}

impl FromStr for Ordering {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let fields = s
            .split(FIELD_SEPARATOR)
            .map(str::trim)
            .map(|field| {
                if field.is_empty() {
                    return Err(Error::invalid_config()
                        .with_message(format!("empty field in ordering '{s}'")));
                }
                OrderField::from_str(field)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(fields)
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{FIELD_SEPARATOR}")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl From<Ordering> for String {
    fn from(ordering: Ordering) -> Self {
        ordering.to_string()
    }
}

impl TryFrom<String> for Ordering {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl<'a> IntoIterator for &'a Ordering {
    type IntoIter = std::slice::Iter<'a, OrderField>;
    type Item = &'a OrderField;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
