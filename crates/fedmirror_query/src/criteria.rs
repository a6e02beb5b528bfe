//! Predicates, criteria trees and the criteria builders.

use crate::value::FilterValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An atomic field predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Field equals the value exactly.
    Eq {
        /// Field name.
        field: String,
        /// Expected value.
        value: FilterValue,
    },
    /// Field is a member of the value set.
    In {
        /// Field name.
        field: String,
        /// Accepted values.
        values: Vec<FilterValue>,
    },
    /// Field is absent or null.
    IsNull {
        /// Field name.
        field: String,
    },
    /// Field contains the fragment as a literal substring.
    ///
    /// The fragment is never interpreted as a pattern language; the
    /// executor wraps it, the caller's text is matched verbatim.
    Contains {
        /// Field name.
        field: String,
        /// Literal substring.
        fragment: String,
    },
}

impl Predicate {
    /// Creates an equality predicate.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Predicate::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a set-membership predicate.
    pub fn is_in(field: impl Into<String>, values: Vec<FilterValue>) -> Self {
        Predicate::In {
            field: field.into(),
            values,
        }
    }

    /// Creates an is-absent/null predicate.
    pub fn is_null(field: impl Into<String>) -> Self {
        Predicate::IsNull {
            field: field.into(),
        }
    }

    /// Creates a substring predicate.
    pub fn contains(field: impl Into<String>, fragment: impl Into<String>) -> Self {
        Predicate::Contains {
            field: field.into(),
            fragment: fragment.into(),
        }
    }

    /// Returns the field the predicate applies to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Predicate::Eq { field, .. }
            | Predicate::In { field, .. }
            | Predicate::IsNull { field }
            | Predicate::Contains { field, .. } => field,
        }
    }
}

/// A boolean query tree over predicates.
///
/// `Empty` is the empty criteria: the identity element for both
/// combinators and the root of an unfiltered query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Criteria {
    /// The empty criteria (matches everything, combines as identity).
    Empty,
    /// A single predicate.
    Where(Predicate),
    /// Conjunction of sub-criteria.
    And(Vec<Criteria>),
    /// Disjunction of sub-criteria.
    Or(Vec<Criteria>),
}

impl Criteria {
    /// Returns true if this is the empty criteria.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Criteria::Empty)
    }

    /// Conjoins a group of criteria onto the running criteria.
    ///
    /// An empty group leaves the criteria unchanged. Applied to the
    /// empty criteria the result is the conjunction of the group alone;
    /// otherwise the running criteria becomes the first conjunct.
    #[must_use]
    pub fn and_operator(self, group: Vec<Criteria>) -> Criteria {
        if group.is_empty() {
            return self;
        }
        match self {
            Criteria::Empty => Criteria::And(group),
            running => {
                let mut items = Vec::with_capacity(group.len() + 1);
                items.push(running);
                items.extend(group);
                Criteria::And(items)
            }
        }
    }

    /// Disjoins a group of criteria onto the running criteria.
    ///
    /// This wraps whatever has accumulated so far: applying it after
    /// `and_operator` yields `(running) OR (group...)`, not a
    /// conjunction of the two groups. Query assembly depends on this
    /// sequential combination order.
    #[must_use]
    pub fn or_operator(self, group: Vec<Criteria>) -> Criteria {
        if group.is_empty() {
            return self;
        }
        match self {
            Criteria::Empty => Criteria::Or(group),
            running => {
                let mut items = Vec::with_capacity(group.len() + 1);
                items.push(running);
                items.extend(group);
                Criteria::Or(items)
            }
        }
    }
}

impl From<Predicate> for Criteria {
    fn from(predicate: Predicate) -> Self {
        Criteria::Where(predicate)
    }
}

/// Builds the conjunctive predicate list from the AND parameter map.
///
/// Multi-valued parameters become membership predicates, the null
/// sentinel becomes an is-absent predicate, any other scalar becomes an
/// exact-equality predicate. Entries are emitted in key order.
#[must_use]
pub fn build_and_criteria(params: &BTreeMap<String, FilterValue>) -> Vec<Predicate> {
    params
        .iter()
        .map(|(field, value)| match value {
            FilterValue::List(values) => Predicate::is_in(field.clone(), values.clone()),
            FilterValue::Null => Predicate::is_null(field.clone()),
            scalar => Predicate::eq(field.clone(), scalar.clone()),
        })
        .collect()
}

/// Builds the disjunctive predicate list from the OR parameter map.
///
/// Multi-valued parameters still use membership (not substring), textual
/// scalars become literal-substring predicates, and non-textual scalars
/// become equality predicates. The null sentinel is typed, not textual,
/// so it follows the non-textual branch and becomes an is-absent
/// predicate rather than a substring match against "null".
#[must_use]
pub fn build_or_criteria(params: &BTreeMap<String, FilterValue>) -> Vec<Predicate> {
    params
        .iter()
        .map(|(field, value)| match value {
            FilterValue::List(values) => Predicate::is_in(field.clone(), values.clone()),
            FilterValue::Text(fragment) => Predicate::contains(field.clone(), fragment.clone()),
            FilterValue::Null => Predicate::is_null(field.clone()),
            scalar => Predicate::eq(field.clone(), scalar.clone()),
        })
        .collect()
}
