//! Query assembly.

use crate::criteria::{build_and_criteria, build_or_criteria, Criteria, Predicate};
use crate::filter::SearchFilter;
use crate::page::PageRequest;
use crate::value::FilterValue;
use fedmirror_core::ResourceId;
use serde::{Deserialize, Serialize};

/// An executable query description.
///
/// The descriptor is an opaque structured value for the storage layer:
/// a criteria tree plus optional paging/sorting directives. Building a
/// descriptor executes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    /// The boolean predicate tree.
    pub criteria: Criteria,
    /// Paging/sorting directives, when requested.
    pub page: Option<PageRequest>,
}

impl QueryDescriptor {
    /// Creates an unfiltered, unpaged descriptor.
    #[must_use]
    pub fn unfiltered() -> Self {
        Self {
            criteria: Criteria::Empty,
            page: None,
        }
    }
}

/// Assembles a `QueryDescriptor` from a `SearchFilter`.
///
/// The AND group is conjoined onto the running criteria first, then the
/// OR group is disjoined onto the *result* of that step. The
/// combination is sequential, not parenthesized: with both groups
/// present the final shape is `(custom + AND group) OR (or group...)`.
///
/// A tenant predicate from `tenant_criteria` is passed through
/// [`QueryBuilder::custom`], which seeds the running criteria the same
/// way a caller-supplied restriction does.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    filter: &'a SearchFilter,
    custom: Option<Criteria>,
    paged: bool,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a builder that attaches the filter's paging directives.
    #[must_use]
    pub fn new(filter: &'a SearchFilter) -> Self {
        Self {
            filter,
            custom: None,
            paged: true,
        }
    }

    /// Creates a builder for a count query: same criteria, no paging.
    #[must_use]
    pub fn count(filter: &'a SearchFilter) -> Self {
        Self::new(filter).paged(false)
    }

    /// Seeds the running criteria with a custom restriction.
    #[must_use]
    pub fn custom(mut self, criteria: Criteria) -> Self {
        self.custom = Some(criteria);
        self
    }

    /// Sets whether paging directives are attached.
    #[must_use]
    pub fn paged(mut self, paged: bool) -> Self {
        self.paged = paged;
        self
    }

    /// Builds the query descriptor.
    #[must_use]
    pub fn build(self) -> QueryDescriptor {
        let mut criteria = self.custom.unwrap_or(Criteria::Empty);

        let and_group = build_and_criteria(self.filter.and_params());
        if !and_group.is_empty() {
            criteria = criteria.and_operator(and_group.into_iter().map(Criteria::from).collect());
        }

        let or_group = build_or_criteria(self.filter.or_params());
        if !or_group.is_empty() {
            criteria = criteria.or_operator(or_group.into_iter().map(Criteria::from).collect());
        }

        QueryDescriptor {
            criteria,
            page: if self.paged {
                self.filter.page().cloned()
            } else {
                None
            },
        }
    }
}

/// Builds an unpaged query matching resources whose `id` is in `ids`.
#[must_use]
pub fn query_for_ids<I>(ids: I) -> QueryDescriptor
where
    I: IntoIterator<Item = ResourceId>,
{
    query_for_param_in(
        "id",
        ids.into_iter().map(|id| FilterValue::Text(id.into_string())),
    )
}

/// Builds an unpaged query matching records whose `field` is in `values`.
#[must_use]
pub fn query_for_param_in<I, V>(field: impl Into<String>, values: I) -> QueryDescriptor
where
    I: IntoIterator<Item = V>,
    V: Into<FilterValue>,
{
    let values = values.into_iter().map(Into::into).collect();
    QueryDescriptor {
        criteria: Criteria::Where(Predicate::is_in(field, values)),
        page: None,
    }
}
