use std::fmt;
use std::str::FromStr;

use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Prefix marking a descending field in the textual form.
const DESCENDING_PREFIX: char = '-';

/// Separator between relationship hops in a field path.
const PATH_SEPARATOR: char = '.';

/// Sort order direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order (A-Z, oldest first, smallest first).
    #[default]
    Asc,
    /// Descending order (Z-A, newest first, largest first).
    Desc,
}

impl SortOrder {
    /// Returns the opposite direction.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// A possibly dotted path to a record field, e.g. `simple.name`.
///
/// Every segment but the last names a relationship to traverse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Creates a field path without validating it.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the relationship hops followed by the field name.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR)
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FieldPath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.split(PATH_SEPARATOR).any(str::is_empty) {
            return Err(Error::invalid_config().with_message(format!("invalid field path '{s}'")));
        }

        Ok(Self::new(s))
    }
}

/// Sort specification for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderField {
    /// The field to sort by.
    path: FieldPath,
    /// The sort order direction.
    #[serde(default)]
    order: SortOrder,
}

impl OrderField {
    /// Creates a new sort specification with the given field and order.
    #[inline]
    pub fn new(path: impl Into<FieldPath>, order: SortOrder) -> Self {
        Self {
            path: path.into(),
            order,
        }
    }

    /// Creates a new sort specification with ascending order.
    #[inline]
    pub fn asc(path: impl Into<FieldPath>) -> Self {
        Self::new(path, SortOrder::Asc)
    }

    /// Creates a new sort specification with descending order.
    #[inline]
    pub fn desc(path: impl Into<FieldPath>) -> Self {
        Self::new(path, SortOrder::Desc)
    }

    /// Returns the field path.
    #[inline]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the sort order direction.
    #[inline]
    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Returns whether the sort order is ascending.
    #[inline]
    pub fn is_asc(&self) -> bool {
        matches!(self.order, SortOrder::Asc)
    }

    /// Returns whether the sort order is descending.
    #[inline]
    pub fn is_desc(&self) -> bool {
        matches!(self.order, SortOrder::Desc)
    }

    /// Returns the same field sorted the other way.
    pub fn reversed(&self) -> Self {
        Self::new(self.path.clone(), self.order.reverse())
    }
}

impl FromStr for OrderField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.strip_prefix(DESCENDING_PREFIX) {
            Some(path) => Ok(Self::desc(path.parse::<FieldPath>()?)),
            None => Ok(Self::asc(s.parse::<FieldPath>()?)),
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_desc() {
            write!(f, "{DESCENDING_PREFIX}")?;
        }
        write!(f, "{}", self.path)
    }
}
