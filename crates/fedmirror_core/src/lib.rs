//! # FedMirror Core
//!
//! Core domain types for FedMirror.
//!
//! This crate provides:
//! - `ResourceId` for stable catalog resource identifiers
//! - `Timestamp` for epoch-millis instants
//! - `Identifiable` and `Timestamped` capability traits
//! - `TenantId` for multi-tenant deployments
//!
//! This is a pure vocabulary crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod resource;
mod tenant;
mod time;

pub use resource::{Identifiable, ResourceId, Timestamped};
pub use tenant::TenantId;
pub use time::Timestamp;
