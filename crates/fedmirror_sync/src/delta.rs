//! Resource delta calculation.

use fedmirror_core::{Identifiable, ResourceId, Timestamp, Timestamped};
use std::collections::HashMap;

/// The synchronization delta between a remote resource snapshot and a
/// local mirror of the same logical collection.
///
/// The delta holds three disjoint id lists:
/// - `to_insert`: present remotely, absent locally
/// - `to_update`: present on both sides and updated strictly after the
///   last synchronization
/// - `to_delete`: present locally, absent remotely
///
/// The two input maps are retained so the caller can look up full
/// payloads for the ids without a second fetch.
///
/// `R` is the remote resource family, `L` the local one; the two share
/// nothing but the id space, so the calculator only asks for the
/// capabilities it needs (`Timestamped` on the remote side).
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDelta<R, L> {
    to_insert: Vec<ResourceId>,
    to_update: Vec<ResourceId>,
    to_delete: Vec<ResourceId>,
    remote: HashMap<ResourceId, R>,
    local: HashMap<ResourceId, L>,
}

impl<R: Timestamped, L> ResourceDelta<R, L> {
    /// Computes the delta between a remote snapshot and a local mirror.
    ///
    /// An absent `last_sync` means the source has never been
    /// synchronized and is treated as the epoch, so every remote
    /// resource counts as new or changed, never silently skipped.
    ///
    /// The update comparison is strict: a resource updated exactly at
    /// `last_sync` is unchanged. The cursor is tracked per federation
    /// source, not per resource, so a failed or skipped cycle re-marks
    /// resources for update on the next run; applying an update must
    /// therefore be idempotent.
    ///
    /// The id lists are sorted ascending, so equal inputs always
    /// produce equal deltas.
    #[must_use]
    pub fn compute(
        last_sync: Option<Timestamp>,
        remote: HashMap<ResourceId, R>,
        local: HashMap<ResourceId, L>,
    ) -> Self {
        let last_sync = last_sync.unwrap_or(Timestamp::EPOCH);

        let mut to_insert = Vec::new();
        let mut to_update = Vec::new();
        let mut to_delete = Vec::new();

        // First pass: remote resources that are new locally, or that
        // changed after the last synchronization.
        for (id, resource) in &remote {
            if !local.contains_key(id) {
                to_insert.push(id.clone());
            } else if resource.updated_at() > last_sync {
                to_update.push(id.clone());
            }
        }

        // Second pass: local resources that no longer exist remotely.
        for id in local.keys() {
            if !remote.contains_key(id) {
                to_delete.push(id.clone());
            }
        }

        to_insert.sort_unstable();
        to_update.sort_unstable();
        to_delete.sort_unstable();

        Self {
            to_insert,
            to_update,
            to_delete,
            remote,
            local,
        }
    }
}

impl<R: Identifiable + Timestamped, L: Identifiable> ResourceDelta<R, L> {
    /// Builds the id-keyed maps from resource iterators, then computes
    /// the delta.
    ///
    /// Keys come from each resource's own id, so key uniqueness holds
    /// by construction; a later resource replaces an earlier one with
    /// the same id.
    #[must_use]
    pub fn from_resources(
        last_sync: Option<Timestamp>,
        remote: impl IntoIterator<Item = R>,
        local: impl IntoIterator<Item = L>,
    ) -> Self {
        let remote = remote
            .into_iter()
            .map(|resource| (resource.id().clone(), resource))
            .collect();
        let local = local
            .into_iter()
            .map(|resource| (resource.id().clone(), resource))
            .collect();
        Self::compute(last_sync, remote, local)
    }
}

impl<R, L> ResourceDelta<R, L> {
    /// Ids of remote resources missing from the mirror.
    #[must_use]
    pub fn to_insert(&self) -> &[ResourceId] {
        &self.to_insert
    }

    /// Ids of resources changed since the last synchronization.
    #[must_use]
    pub fn to_update(&self) -> &[ResourceId] {
        &self.to_update
    }

    /// Ids of mirrored resources that no longer exist remotely.
    #[must_use]
    pub fn to_delete(&self) -> &[ResourceId] {
        &self.to_delete
    }

    /// The remote snapshot the delta was computed from.
    #[must_use]
    pub fn remote(&self) -> &HashMap<ResourceId, R> {
        &self.remote
    }

    /// The local snapshot the delta was computed from.
    #[must_use]
    pub fn local(&self) -> &HashMap<ResourceId, L> {
        &self.local
    }

    /// Looks up a remote resource payload by id.
    #[must_use]
    pub fn remote_resource(&self, id: &str) -> Option<&R> {
        self.remote.get(id)
    }

    /// Looks up a local resource payload by id.
    #[must_use]
    pub fn local_resource(&self, id: &str) -> Option<&L> {
        self.local.get(id)
    }

    /// Returns true if the mirror is already in sync with the source.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_insert.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct RemoteSensor {
        id: ResourceId,
        updated_at: Timestamp,
    }

    impl RemoteSensor {
        fn new(id: &str, updated_at: i64) -> Self {
            Self {
                id: ResourceId::from(id),
                updated_at: Timestamp::from_millis(updated_at),
            }
        }
    }

    impl Identifiable for RemoteSensor {
        fn id(&self) -> &ResourceId {
            &self.id
        }
    }

    impl Timestamped for RemoteSensor {
        fn updated_at(&self) -> Timestamp {
            self.updated_at
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct LocalSensor {
        id: ResourceId,
    }

    impl LocalSensor {
        fn new(id: &str) -> Self {
            Self {
                id: ResourceId::from(id),
            }
        }
    }

    impl Identifiable for LocalSensor {
        fn id(&self) -> &ResourceId {
            &self.id
        }
    }

    fn remote_map(entries: &[(&str, i64)]) -> HashMap<ResourceId, RemoteSensor> {
        entries
            .iter()
            .map(|(id, at)| (ResourceId::from(*id), RemoteSensor::new(id, *at)))
            .collect()
    }

    fn local_map(ids: &[&str]) -> HashMap<ResourceId, LocalSensor> {
        ids.iter()
            .map(|id| (ResourceId::from(*id), LocalSensor::new(id)))
            .collect()
    }

    fn ids(raw: &[&str]) -> Vec<ResourceId> {
        raw.iter().map(|id| ResourceId::from(*id)).collect()
    }

    #[test]
    fn insert_update_delete_partition() {
        // a is new, b is unchanged (50 <= 60), c is gone remotely.
        let delta = ResourceDelta::compute(
            Some(Timestamp::from_millis(60)),
            remote_map(&[("a", 100), ("b", 50)]),
            local_map(&["b", "c"]),
        );

        assert_eq!(delta.to_insert(), ids(&["a"]));
        assert!(delta.to_update().is_empty());
        assert_eq!(delta.to_delete(), ids(&["c"]));
    }

    #[test]
    fn never_synced_marks_every_remote() {
        let delta: ResourceDelta<RemoteSensor, LocalSensor> =
            ResourceDelta::compute(None, remote_map(&[("a", 100)]), HashMap::new());

        assert_eq!(delta.to_insert(), ids(&["a"]));
        assert!(delta.to_update().is_empty());
        assert!(delta.to_delete().is_empty());
    }

    #[test]
    fn empty_remote_deletes_all_locals() {
        let delta: ResourceDelta<RemoteSensor, LocalSensor> = ResourceDelta::compute(
            Some(Timestamp::from_millis(10)),
            HashMap::new(),
            local_map(&["x", "y"]),
        );

        assert!(delta.to_insert().is_empty());
        assert!(delta.to_update().is_empty());
        assert_eq!(delta.to_delete(), ids(&["x", "y"]));
    }

    #[test]
    fn empty_local_inserts_all_remotes_regardless_of_age() {
        let delta: ResourceDelta<RemoteSensor, LocalSensor> = ResourceDelta::compute(
            Some(Timestamp::from_millis(1_000)),
            remote_map(&[("old", 1), ("new", 2_000)]),
            HashMap::new(),
        );

        assert_eq!(delta.to_insert(), ids(&["new", "old"]));
        assert!(delta.to_update().is_empty());
    }

    #[test]
    fn update_comparison_is_strict() {
        let delta = ResourceDelta::compute(
            Some(Timestamp::from_millis(100)),
            remote_map(&[("at", 100), ("after", 101), ("before", 99)]),
            local_map(&["at", "after", "before"]),
        );

        // Exactly-at-last-sync is unchanged.
        assert_eq!(delta.to_update(), ids(&["after"]));
        assert!(delta.to_insert().is_empty());
        assert!(delta.to_delete().is_empty());
    }

    #[test]
    fn absent_last_sync_is_epoch() {
        // updated_at of zero is not strictly greater than the epoch.
        let delta = ResourceDelta::compute(
            None,
            remote_map(&[("frozen", 0), ("live", 1)]),
            local_map(&["frozen", "live"]),
        );

        assert_eq!(delta.to_update(), ids(&["live"]));
    }

    #[test]
    fn retains_input_maps() {
        let delta = ResourceDelta::compute(
            Some(Timestamp::from_millis(60)),
            remote_map(&[("a", 100)]),
            local_map(&["c"]),
        );

        assert_eq!(delta.remote_resource("a"), Some(&RemoteSensor::new("a", 100)));
        assert_eq!(delta.local_resource("c"), Some(&LocalSensor::new("c")));
        assert!(delta.remote_resource("c").is_none());
        assert!(delta.local_resource("a").is_none());
    }

    #[test]
    fn noop_when_in_sync() {
        let delta = ResourceDelta::compute(
            Some(Timestamp::from_millis(100)),
            remote_map(&[("a", 50), ("b", 100)]),
            local_map(&["a", "b"]),
        );

        assert!(delta.is_noop());
    }

    #[test]
    fn from_resources_builds_unique_keys() {
        let delta = ResourceDelta::from_resources(
            None,
            vec![
                RemoteSensor::new("a", 10),
                // Same id again: later resource wins.
                RemoteSensor::new("a", 20),
            ],
            vec![LocalSensor::new("b")],
        );

        assert_eq!(delta.remote().len(), 1);
        assert_eq!(delta.remote_resource("a").unwrap().updated_at.as_millis(), 20);
        assert_eq!(delta.to_insert(), ids(&["a"]));
        assert_eq!(delta.to_delete(), ids(&["b"]));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn remote_strategy() -> impl Strategy<Value = HashMap<ResourceId, RemoteSensor>> {
            proptest::collection::hash_map("[a-l]", 0i64..200, 0..12).prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|(id, at)| (ResourceId::from(id.as_str()), RemoteSensor::new(&id, at)))
                    .collect()
            })
        }

        fn local_strategy() -> impl Strategy<Value = HashMap<ResourceId, LocalSensor>> {
            proptest::collection::hash_set("[a-l]", 0..12).prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|id| (ResourceId::from(id.as_str()), LocalSensor::new(&id)))
                    .collect()
            })
        }

        fn last_sync_strategy() -> impl Strategy<Value = Option<Timestamp>> {
            proptest::option::of((0i64..200).prop_map(Timestamp::from_millis))
        }

        proptest! {
            #[test]
            fn lists_are_pairwise_disjoint(
                last_sync in last_sync_strategy(),
                remote in remote_strategy(),
                local in local_strategy(),
            ) {
                let delta = ResourceDelta::compute(last_sync, remote, local);

                let inserts: HashSet<_> = delta.to_insert().iter().collect();
                let updates: HashSet<_> = delta.to_update().iter().collect();
                let deletes: HashSet<_> = delta.to_delete().iter().collect();

                prop_assert!(inserts.is_disjoint(&updates));
                prop_assert!(inserts.is_disjoint(&deletes));
                prop_assert!(updates.is_disjoint(&deletes));
            }

            #[test]
            fn every_id_is_accounted_for(
                last_sync in last_sync_strategy(),
                remote in remote_strategy(),
                local in local_strategy(),
            ) {
                let delta = ResourceDelta::compute(last_sync, remote, local);

                let inserts: HashSet<_> = delta.to_insert().iter().cloned().collect();
                let updates: HashSet<_> = delta.to_update().iter().cloned().collect();
                let deletes: HashSet<_> = delta.to_delete().iter().cloned().collect();

                // Remote ids land in insert, update or nowhere -- never
                // in delete.
                for id in delta.remote().keys() {
                    prop_assert!(!deletes.contains(id));
                    if !delta.local().contains_key(id) {
                        prop_assert!(inserts.contains(id));
                    } else {
                        prop_assert!(!inserts.contains(id));
                    }
                }

                // Local-only ids land in delete exactly once.
                for id in delta.local().keys() {
                    if delta.remote().contains_key(id) {
                        prop_assert!(!deletes.contains(id));
                    } else {
                        prop_assert!(deletes.contains(id));
                        prop_assert!(!inserts.contains(id));
                        prop_assert!(!updates.contains(id));
                    }
                }

                let delete_count = delta.to_delete().len();
                prop_assert_eq!(delete_count, deletes.len());
            }

            #[test]
            fn updates_shrink_as_last_sync_advances(
                (earlier, later) in (0i64..200, 0i64..200)
                    .prop_map(|(a, b)| (a.min(b), a.max(b))),
                remote in remote_strategy(),
                local in local_strategy(),
            ) {
                let at_earlier = ResourceDelta::compute(
                    Some(Timestamp::from_millis(earlier)),
                    remote.clone(),
                    local.clone(),
                );
                let at_later = ResourceDelta::compute(
                    Some(Timestamp::from_millis(later)),
                    remote,
                    local,
                );

                let earlier_updates: HashSet<_> = at_earlier.to_update().iter().collect();
                for id in at_later.to_update() {
                    prop_assert!(earlier_updates.contains(id));
                }
            }

            #[test]
            fn equal_inputs_give_equal_deltas(
                last_sync in last_sync_strategy(),
                remote in remote_strategy(),
                local in local_strategy(),
            ) {
                let first = ResourceDelta::compute(last_sync, remote.clone(), local.clone());
                let second = ResourceDelta::compute(last_sync, remote, local);

                prop_assert_eq!(first.to_insert(), second.to_insert());
                prop_assert_eq!(first.to_update(), second.to_update());
                prop_assert_eq!(first.to_delete(), second.to_delete());
            }
        }
    }
}
