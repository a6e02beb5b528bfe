//! # FedMirror Sync
//!
//! Reconciliation engine for federated catalog mirrors.
//!
//! This crate provides:
//! - `ResourceDelta` computing insert/update/delete id sets between a
//!   remote snapshot and a local mirror
//! - `FederationConfig` with the last-synchronization cursor
//! - `FederationEngine` driving one fetch → delta → apply cycle over
//!   collaborator traits
//! - In-memory collaborators for tests
//!
//! ## Architecture
//!
//! The delta calculation is a pure function: given the remote snapshot,
//! the local snapshot and the last-sync instant it produces three
//! disjoint id lists. Fetching snapshots and applying the lists belong
//! to collaborators behind the `RemoteCatalog` and `LocalMirror` traits.
//!
//! ## Key Invariants
//!
//! - The three id lists are pairwise disjoint
//! - A remote id never appears in the delete list
//! - "Changed" means updated strictly after the last sync
//! - Delta computation is deterministic: equal inputs, equal results
//! - Apply operations are assumed idempotent; a skipped or failed cycle
//!   re-marks items for update rather than dropping them

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod delta;
mod engine;
mod error;

pub use config::FederationConfig;
pub use delta::ResourceDelta;
pub use engine::{
    CycleOutcome, EngineState, FederationEngine, FederationStats, LocalMirror, MemoryCatalog,
    MemoryMirror, RemoteCatalog,
};
pub use error::{SyncError, SyncResult};
