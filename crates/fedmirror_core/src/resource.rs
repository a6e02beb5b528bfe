//! Resource identifiers and capability traits.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable identifier for a catalog resource.
///
/// Resource IDs are caller-supplied strings that are:
/// - Stable across the remote catalog and the local mirror
/// - Shared between the remote and local representations of the
///   same logical resource
/// - Never reused for a different resource
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a resource ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID, returning the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Capability trait for resources with a stable identifier.
pub trait Identifiable {
    /// Returns the resource's stable identifier.
    fn id(&self) -> &ResourceId;
}

/// Capability trait for resources that track their last modification.
///
/// Remote catalog resources expose `updated_at` so the delta calculator
/// can compare against the last synchronization instant.
pub trait Timestamped {
    /// Returns the instant the resource was last updated.
    fn updated_at(&self) -> Timestamp;
}
