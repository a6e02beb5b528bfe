//! Federation cycle driver.

use crate::config::FederationConfig;
use crate::delta::ResourceDelta;
use crate::error::{SyncError, SyncResult};
use fedmirror_core::{ResourceId, Timestamped};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// The current state of the federation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Engine is idle, no cycle running.
    Idle,
    /// Engine is fetching the remote and local snapshots.
    Fetching,
    /// Engine is applying the computed delta to the mirror.
    Applying,
    /// Engine completed a cycle.
    Synced,
    /// Engine encountered an error.
    Error,
}

impl EngineState {
    /// Returns true if a cycle is currently running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, EngineState::Fetching | EngineState::Applying)
    }

    /// Returns true if the engine can start a new cycle.
    #[must_use]
    pub fn can_start(&self) -> bool {
        !self.is_active()
    }
}

/// Statistics about federation cycles.
#[derive(Debug, Clone, Default)]
pub struct FederationStats {
    /// Total number of cycles completed.
    pub cycles_completed: u64,
    /// Total number of resources inserted.
    pub resources_inserted: u64,
    /// Total number of resources updated.
    pub resources_updated: u64,
    /// Total number of resources deleted.
    pub resources_deleted: u64,
    /// Instant of the last completed cycle.
    pub last_cycle_time: Option<Instant>,
    /// Last error message.
    pub last_error: Option<String>,
}

/// Result of one federation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Number of resources inserted into the mirror.
    pub inserted: usize,
    /// Number of resources updated in the mirror.
    pub updated: usize,
    /// Number of resources deleted from the mirror.
    pub deleted: usize,
    /// Number of remote resources left untouched.
    pub unchanged: usize,
    /// Duration of the cycle.
    pub duration: Duration,
}

impl CycleOutcome {
    /// Returns true if the cycle changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.updated == 0 && self.deleted == 0
    }
}

/// Supplies the remote resource snapshot for a federated source.
///
/// Network transport, partial-result handling and authentication live
/// behind this trait; the engine only sees a complete snapshot or an
/// error.
pub trait RemoteCatalog<R> {
    /// Fetches the current remote snapshot, keyed by resource id.
    fn fetch_snapshot(&self) -> SyncResult<HashMap<ResourceId, R>>;
}

/// Reads and mutates the local mirror of a federated collection.
///
/// Apply operations receive the remote snapshot so they can look up the
/// full payloads for the ids being applied. They must be idempotent: a
/// re-marked update after a failed cycle is applied again.
pub trait LocalMirror<R, L> {
    /// Loads the current mirror snapshot, keyed by resource id.
    fn load_snapshot(&self) -> SyncResult<HashMap<ResourceId, L>>;

    /// Inserts the given remote resources into the mirror.
    fn apply_inserts(
        &self,
        ids: &[ResourceId],
        remote: &HashMap<ResourceId, R>,
    ) -> SyncResult<()>;

    /// Updates the given resources in the mirror from their remote state.
    fn apply_updates(
        &self,
        ids: &[ResourceId],
        remote: &HashMap<ResourceId, R>,
    ) -> SyncResult<()>;

    /// Deletes the given resources from the mirror.
    fn apply_deletes(&self, ids: &[ResourceId]) -> SyncResult<()>;
}

/// Drives fetch → delta → apply cycles for one federated source.
///
/// The engine is synchronous and never retries or sleeps; the caller
/// owns scheduling and retry policy. It also never advances the
/// configuration's `last_sync_time` — the configuration store does that
/// once a cycle has been persisted.
pub struct FederationEngine<C, M> {
    config: FederationConfig,
    catalog: C,
    mirror: M,
    state: RwLock<EngineState>,
    stats: RwLock<FederationStats>,
}

impl<C, M> FederationEngine<C, M> {
    /// Creates an engine over a catalog and a mirror.
    pub fn new(config: FederationConfig, catalog: C, mirror: M) -> Self {
        Self {
            config,
            catalog,
            mirror,
            state: RwLock::new(EngineState::Idle),
            stats: RwLock::new(FederationStats::default()),
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &FederationConfig {
        &self.config
    }

    /// Returns the remote catalog collaborator.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Returns the local mirror collaborator.
    pub fn mirror(&self) -> &M {
        &self.mirror
    }

    /// Returns the current state.
    pub fn state(&self) -> EngineState {
        *self.state.read()
    }

    /// Returns the current stats.
    pub fn stats(&self) -> FederationStats {
        self.stats.read().clone()
    }

    fn set_state(&self, state: EngineState) {
        *self.state.write() = state;
    }

    /// Records a failure and passes the error through.
    fn fail(&self, error: SyncError) -> SyncError {
        self.set_state(EngineState::Error);
        self.stats.write().last_error = Some(error.to_string());
        error
    }

    /// Runs one fetch → delta → apply cycle.
    ///
    /// Inserts are applied first, then updates, then deletes. The
    /// returned outcome carries the per-phase counts; the delta itself
    /// is an implementation detail of the cycle.
    pub fn sync_cycle<R, L>(&self) -> SyncResult<CycleOutcome>
    where
        C: RemoteCatalog<R>,
        M: LocalMirror<R, L>,
        R: Timestamped,
    {
        let start = Instant::now();

        if !self.config.active {
            return Err(SyncError::SourceInactive {
                source_id: self.config.source_id.clone(),
            });
        }

        if !self.state().can_start() {
            return Err(SyncError::CycleInProgress);
        }

        self.set_state(EngineState::Fetching);
        let remote = self.catalog.fetch_snapshot().map_err(|e| self.fail(e))?;
        let local = self.mirror.load_snapshot().map_err(|e| self.fail(e))?;
        debug!(
            source = %self.config.source_id,
            remote = remote.len(),
            local = local.len(),
            "snapshots loaded"
        );

        let delta = ResourceDelta::compute(self.config.last_sync_time, remote, local);
        debug!(
            source = %self.config.source_id,
            inserts = delta.to_insert().len(),
            updates = delta.to_update().len(),
            deletes = delta.to_delete().len(),
            "delta computed"
        );

        self.set_state(EngineState::Applying);
        self.mirror
            .apply_inserts(delta.to_insert(), delta.remote())
            .map_err(|e| self.fail(e))?;
        self.mirror
            .apply_updates(delta.to_update(), delta.remote())
            .map_err(|e| self.fail(e))?;
        self.mirror
            .apply_deletes(delta.to_delete())
            .map_err(|e| self.fail(e))?;

        let inserted = delta.to_insert().len();
        let updated = delta.to_update().len();
        let deleted = delta.to_delete().len();
        let outcome = CycleOutcome {
            inserted,
            updated,
            deleted,
            unchanged: delta.remote().len() - inserted - updated,
            duration: start.elapsed(),
        };

        self.set_state(EngineState::Synced);
        {
            let mut stats = self.stats.write();
            stats.cycles_completed += 1;
            stats.resources_inserted += inserted as u64;
            stats.resources_updated += updated as u64;
            stats.resources_deleted += deleted as u64;
            stats.last_cycle_time = Some(Instant::now());
            stats.last_error = None;
        }

        info!(
            source = %self.config.source_id,
            inserted,
            updated,
            deleted,
            unchanged = outcome.unchanged,
            "federation cycle complete"
        );

        Ok(outcome)
    }
}

/// An in-memory remote catalog for tests.
#[derive(Debug)]
pub struct MemoryCatalog<R> {
    resources: RwLock<HashMap<ResourceId, R>>,
    fail_message: RwLock<Option<String>>,
}

impl<R> MemoryCatalog<R> {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: RwLock::new(HashMap::new()),
            fail_message: RwLock::new(None),
        }
    }

    /// Puts a resource into the catalog.
    pub fn put(&self, id: ResourceId, resource: R) {
        self.resources.write().insert(id, resource);
    }

    /// Removes a resource from the catalog.
    pub fn remove(&self, id: &str) {
        self.resources.write().remove(id);
    }

    /// Makes all subsequent fetches fail with a retryable error.
    pub fn fail_fetches(&self, message: impl Into<String>) {
        *self.fail_message.write() = Some(message.into());
    }
}

impl<R> Default for MemoryCatalog<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> RemoteCatalog<R> for MemoryCatalog<R> {
    fn fetch_snapshot(&self) -> SyncResult<HashMap<ResourceId, R>> {
        if let Some(message) = self.fail_message.read().clone() {
            return Err(SyncError::fetch_retryable(message));
        }
        Ok(self.resources.read().clone())
    }
}

/// An in-memory mirror whose local representation is the remote type.
#[derive(Debug)]
pub struct MemoryMirror<R> {
    resources: RwLock<HashMap<ResourceId, R>>,
}

impl<R> MemoryMirror<R> {
    /// Creates an empty mirror.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resources: RwLock::new(HashMap::new()),
        }
    }

    /// Puts a resource into the mirror.
    pub fn put(&self, id: ResourceId, resource: R) {
        self.resources.write().insert(id, resource);
    }

    /// Returns true if the mirror holds the given id.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.resources.read().contains_key(id)
    }
}

impl<R> Default for MemoryMirror<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> MemoryMirror<R> {
    /// Returns a copy of the mirrored resources.
    #[must_use]
    pub fn resources(&self) -> HashMap<ResourceId, R> {
        self.resources.read().clone()
    }

    fn copy_from_remote(
        &self,
        phase: &str,
        ids: &[ResourceId],
        remote: &HashMap<ResourceId, R>,
    ) -> SyncResult<()> {
        let mut resources = self.resources.write();
        for id in ids {
            let resource = remote.get(id).ok_or_else(|| {
                SyncError::apply(phase, format!("resource {id} missing from remote snapshot"))
            })?;
            resources.insert(id.clone(), resource.clone());
        }
        Ok(())
    }
}

impl<R: Clone> LocalMirror<R, R> for MemoryMirror<R> {
    fn load_snapshot(&self) -> SyncResult<HashMap<ResourceId, R>> {
        Ok(self.resources.read().clone())
    }

    fn apply_inserts(
        &self,
        ids: &[ResourceId],
        remote: &HashMap<ResourceId, R>,
    ) -> SyncResult<()> {
        self.copy_from_remote("insert", ids, remote)
    }

    fn apply_updates(
        &self,
        ids: &[ResourceId],
        remote: &HashMap<ResourceId, R>,
    ) -> SyncResult<()> {
        self.copy_from_remote("update", ids, remote)
    }

    fn apply_deletes(&self, ids: &[ResourceId]) -> SyncResult<()> {
        let mut resources = self.resources.write();
        for id in ids {
            resources.remove(id);
        }
        Ok(())
    }
}
