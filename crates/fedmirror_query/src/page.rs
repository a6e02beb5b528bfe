//! Paging and sorting directives.

use serde::{Deserialize, Serialize};

/// Sort direction for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// A single sort directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortOrder {
    /// Field to sort by.
    pub field: String,
    /// Direction of the sort.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Creates an ascending sort directive.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Creates a descending sort directive.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Paging and sorting directives attached to a query.
///
/// Page numbers are zero-based. The executor owns the actual paging
/// mechanics; this is only the description it receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: u32,
    /// Number of records per page.
    pub size: u32,
    /// Sort directives, applied in order.
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    /// Creates a page request without sorting.
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    /// Appends a sort directive.
    #[must_use]
    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }
}
