//! Filter parameter values.

use fedmirror_core::TenantId;
use serde::{Deserialize, Serialize};

/// A filter parameter value.
///
/// Values are either scalar (`Null`, `Bool`, `Integer`, `Float`, `Text`)
/// or multi-valued (`List`). The distinction drives predicate selection:
/// multi-valued parameters translate to set-membership predicates,
/// scalars to equality or substring predicates.
///
/// `Null` is a legal value, not an absent entry: it represents a filter
/// on the absence of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Absent/null sentinel.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Textual value.
    Text(String),
    /// Multi-valued (set-like) value.
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Returns true if this value is multi-valued.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        matches!(self, FilterValue::List(_))
    }

    /// Returns true if this value is textual.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, FilterValue::Text(_))
    }

    /// Returns true if this value is the null sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }

    /// Returns the contained values if this value is multi-valued.
    #[must_use]
    pub fn as_list(&self) -> Option<&[FilterValue]> {
        match self {
            FilterValue::List(values) => Some(values),
            _ => None,
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Integer(i64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<TenantId> for FilterValue {
    fn from(tenant: TenantId) -> Self {
        FilterValue::Text(tenant.as_str().to_owned())
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FilterValue::Null, Into::into)
    }
}
