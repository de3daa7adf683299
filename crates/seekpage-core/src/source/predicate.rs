use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};

use crate::ordering::FieldPath;

/// Comparison operator of a single filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Comparison {
    /// Strictly greater than.
    Gt,
    /// Strictly less than.
    Lt,
    /// Equal to.
    Eq,
}

impl Comparison {
    /// Returns whether the comparison holds for the given ordering of
    /// `record_value` relative to the filter value.
    pub fn matches(self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};

        matches!(
            (self, ordering),
            (Self::Gt, Greater) | (Self::Lt, Less) | (Self::Eq, Equal)
        )
    }
}

/// A single `field <comparison> value` clause.
///
/// The value is the raw token segment; coercing it to the field's type is
/// up to the data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    /// Field the clause applies to.
    pub field: FieldPath,
    /// Comparison operator.
    pub comparison: Comparison,
    /// Captured value, in its string form.
    pub value: String,
}

impl Filter {
    /// Creates a new filter clause.
    pub fn new(field: FieldPath, comparison: Comparison, value: impl Into<String>) -> Self {
        Self {
            field,
            comparison,
            value: value.into(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}__{}={:?}",
            self.field,
            self.comparison.as_ref(),
            self.value
        )
    }
}

/// A range predicate in disjunctive normal form.
///
/// A record matches when every filter of at least one branch matches. An
/// empty predicate (no branches) matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePredicate {
    branches: Vec<Vec<Filter>>,
}

impl RangePredicate {
    /// Creates a predicate that matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a predicate made of a single conjunction.
    pub fn conjunction(filters: Vec<Filter>) -> Self {
        Self::disjunction(vec![filters])
    }

    /// Creates a predicate from alternative conjunctions.
    pub fn disjunction(branches: Vec<Vec<Filter>>) -> Self {
        let branches = branches
            .into_iter()
            .filter(|branch| !branch.is_empty())
            .collect();
        Self { branches }
    }

    /// Returns whether this predicate matches every record.
    pub fn is_unbounded(&self) -> bool {
        self.branches.is_empty()
    }

    /// Returns the alternative conjunctions.
    pub fn branches(&self) -> &[Vec<Filter>] {
        &self.branches
    }

    /// Evaluates the predicate using `matches` for individual clauses.
    ///
    /// Stops at the first clause error.
    pub fn evaluate<E, F>(&self, mut matches: F) -> Result<bool, E>
    where
        F: FnMut(&Filter) -> Result<bool, E>,
    {
        if self.is_unbounded() {
            return Ok(true);
        }

        for branch in &self.branches {
            let mut satisfied = true;
            for filter in branch {
                if !matches(filter)? {
                    satisfied = false;
                    break;
                }
            }

            if satisfied {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

impl fmt::Display for RangePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            return write!(f, "*");
        }

        for (i, branch) in self.branches.iter().enumerate() {
            if i > 0 {
                write!(f, " OR ")?;
            }
            write!(f, "(")?;
            for (j, filter) in branch.iter().enumerate() {
                if j > 0 {
                    write!(f, " AND ")?;
                }
                write!(f, "{filter}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    fn filter(field: &str, comparison: Comparison, value: &str) -> Filter {
        Filter::new(FieldPath::from(field), comparison, value)
    }

    #[test]
    fn comparison_matches() {
        assert!(Comparison::Gt.matches(Ordering::Greater));
        assert!(!Comparison::Gt.matches(Ordering::Equal));
        assert!(Comparison::Lt.matches(Ordering::Less));
        assert!(Comparison::Eq.matches(Ordering::Equal));
        assert!(!Comparison::Eq.matches(Ordering::Less));
    }

    #[test]
    fn empty_predicate_matches_everything() {
        let predicate = RangePredicate::all();
        assert!(predicate.is_unbounded());
        assert_eq!(predicate.evaluate::<(), _>(|_| Ok(false)), Ok(true));

        let predicate = RangePredicate::conjunction(Vec::new());
        assert!(predicate.is_unbounded());
    }

    #[test]
    fn evaluate_any_branch() {
        let predicate = RangePredicate::disjunction(vec![
            vec![filter("id", Comparison::Gt, "5")],
            vec![
                filter("id", Comparison::Eq, "5"),
                filter("name", Comparison::Gt, "b"),
            ],
        ]);

        let matched = predicate.evaluate::<(), _>(|f| Ok(f.field.as_str() == "name"));
        assert_eq!(matched, Ok(false));

        let matched = predicate.evaluate::<(), _>(|f| {
            Ok(f.comparison != Comparison::Gt || f.field.as_str() == "id")
        });
        assert_eq!(matched, Ok(true));
    }

    #[test]
    fn evaluate_propagates_errors() {
        let predicate = RangePredicate::conjunction(vec![filter("id", Comparison::Gt, "x")]);
        assert_eq!(predicate.evaluate(|_| Err("boom")), Err("boom"));
    }

    #[test]
    fn display_renders_clauses() {
        let predicate = RangePredicate::disjunction(vec![
            vec![filter("id", Comparison::Gt, "5")],
            vec![
                filter("id", Comparison::Eq, "5"),
                filter("name", Comparison::Lt, "b"),
            ],
        ]);
        assert_eq!(
            predicate.to_string(),
            "(id__gt=\"5\") OR (id__eq=\"5\" AND name__lt=\"b\")"
        );
        assert_eq!(RangePredicate::all().to_string(), "*");
    }
}
