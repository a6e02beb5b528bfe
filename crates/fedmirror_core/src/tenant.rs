//! Tenant identifiers for multi-tenant deployments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a tenant in a multi-tenant deployment.
///
/// Construction rejects blank input, so a `TenantId` that exists is
/// always meaningful: callers never need to re-check for emptiness.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a tenant ID, rejecting blank or whitespace-only input.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Returns the tenant ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
