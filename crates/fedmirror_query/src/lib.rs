//! # FedMirror Query
//!
//! Search-filter to query-descriptor translation for FedMirror.
//!
//! This crate provides:
//! - `FilterValue` for scalar and multi-valued filter parameters
//! - `SearchFilter` with conjunctive and disjunctive parameter maps
//! - `Predicate` and `Criteria` for boolean query trees
//! - Tenant scoping over an ambient `TenantContext`
//! - `QueryBuilder` assembling criteria and paging into a `QueryDescriptor`
//!
//! The produced `QueryDescriptor` is an executable description, not an
//! executed query: a storage layer consumes it. This crate performs no I/O.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod criteria;
mod filter;
mod page;
mod query;
mod tenant;
mod value;

pub use criteria::{build_and_criteria, build_or_criteria, Criteria, Predicate};
pub use filter::SearchFilter;
pub use page::{PageRequest, SortDirection, SortOrder};
pub use query::{query_for_ids, query_for_param_in, QueryBuilder, QueryDescriptor};
pub use tenant::{
    requires_tenant_scope, tenant_criteria, EntityKind, NoTenant, SharedTenantContext,
    TenantContext,
};
pub use value::FilterValue;
