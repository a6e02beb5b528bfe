//! Search filter specification.

use crate::page::PageRequest;
use crate::value::FilterValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An abstract search specification.
///
/// A filter carries two parameter maps: `and_params` are combined
/// conjunctively with exact/membership matching; `or_params` are
/// combined disjunctively with substring matching for textual values.
/// Both maps may be empty, in which case the filter degenerates to
/// "no filter" rather than an error.
///
/// Parameter maps are ordered by key so predicate emission, and
/// therefore query assembly, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    and_params: BTreeMap<String, FilterValue>,
    or_params: BTreeMap<String, FilterValue>,
    page: Option<PageRequest>,
}

impl SearchFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a conjunctive parameter.
    ///
    /// The null sentinel is a legal value and filters on field absence.
    #[must_use]
    pub fn with_and_param(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.and_params.insert(field.into(), value.into());
        self
    }

    /// Adds a disjunctive parameter.
    #[must_use]
    pub fn with_or_param(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.or_params.insert(field.into(), value.into());
        self
    }

    /// Attaches paging/sorting directives.
    #[must_use]
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    /// Returns the conjunctive parameter map.
    #[must_use]
    pub fn and_params(&self) -> &BTreeMap<String, FilterValue> {
        &self.and_params
    }

    /// Returns the disjunctive parameter map.
    #[must_use]
    pub fn or_params(&self) -> &BTreeMap<String, FilterValue> {
        &self.or_params
    }

    /// Returns the paging directives, if any.
    #[must_use]
    pub fn page(&self) -> Option<&PageRequest> {
        self.page.as_ref()
    }

    /// Returns true if neither parameter map has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.and_params.is_empty() && self.or_params.is_empty()
    }
}
