//! Proximity grouping.
//!
//! A participant's group is recomputed on demand:
//! 1. Take the registry lock
//! 2. Walk every other participant in ascending id order
//! 3. Adopt the group of the first one within the threshold on both axes
//! 4. With no such neighbor, fall back to the participant's own id
//!
//! The result is written back into the stored record before the lock is
//! released. There is no closure over chains of neighbors, so grouping is
//! not transitive.

use crate::{CoreError, GroupId, ParticipantId, Registry, Result, DEFAULT_THRESHOLD};

/// Computes and persists participant groups from current registry state.
#[derive(Debug, Clone, Copy)]
pub struct GroupingEngine {
    threshold: f64,
}

impl GroupingEngine {
    /// Create an engine with the given per-axis threshold.
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Per-axis proximity threshold.
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolve and store the group of participant `id`.
    ///
    /// Scan and write happen under one hold of the registry lock, so
    /// concurrent resolutions never observe a half-written group.
    pub fn resolve_group(&self, registry: &Registry, id: ParticipantId) -> Result<GroupId> {
        registry.with_participants(|participants| {
            let subject = participants
                .get(&id)
                .map(|p| p.position)
                .ok_or(CoreError::NotFound(id))?;

            let group = participants
                .values()
                .filter(|other| other.id != id)
                .find(|other| other.position.is_near(&subject, self.threshold))
                .map(|neighbor| neighbor.group)
                .unwrap_or_else(|| id.into());

            if let Some(p) = participants.get_mut(&id) {
                p.group = group;
            }
            Ok(group)
        })
    }
}

impl Default for GroupingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Participant, Position};
    use proptest::prelude::*;

    fn registry_with(positions: &[(f64, f64)]) -> Registry {
        let registry = Registry::default();
        for &(x, y) in positions {
            let id = registry.allocate_id().unwrap();
            registry.add(Participant::new(id, Position::new(x, y))).unwrap();
        }
        registry
    }

    fn group_of(registry: &Registry, id: u64) -> GroupId {
        registry.get(ParticipantId(id)).unwrap().group
    }

    #[test]
    fn isolated_participant_keeps_own_group() {
        let registry = registry_with(&[(0.0, 0.0), (5.0, 5.0)]);
        let engine = GroupingEngine::default();

        assert_eq!(engine.resolve_group(&registry, ParticipantId(1)).unwrap(), GroupId(1));
        assert_eq!(group_of(&registry, 1), GroupId(1));
    }

    #[test]
    fn lone_participant_keeps_own_group() {
        let registry = registry_with(&[(2.0, 2.0)]);
        let engine = GroupingEngine::default();
        assert_eq!(engine.resolve_group(&registry, ParticipantId(0)).unwrap(), GroupId(0));
    }

    #[test]
    fn adopts_nearby_group_both_ways() {
        let registry = registry_with(&[(0.0, 0.0), (0.2, 0.2)]);
        let engine = GroupingEngine::default();

        let a = engine.resolve_group(&registry, ParticipantId(0)).unwrap();
        assert_eq!(a, group_of(&registry, 1));

        let b = engine.resolve_group(&registry, ParticipantId(1)).unwrap();
        assert_eq!(b, group_of(&registry, 0));
        assert_eq!(a, b);
    }

    #[test]
    fn adoption_is_written_back() {
        let registry = registry_with(&[(0.0, 0.0), (0.2, 0.2)]);
        let engine = GroupingEngine::default();

        engine.resolve_group(&registry, ParticipantId(1)).unwrap();
        assert_eq!(group_of(&registry, 1), GroupId(0));
    }

    #[test]
    fn exact_threshold_not_grouped() {
        let registry = registry_with(&[(0.0, 0.0), (0.5, 0.0), (0.0, 0.5)]);
        let engine = GroupingEngine::default();

        for id in 0..3 {
            assert_eq!(
                engine.resolve_group(&registry, ParticipantId(id)).unwrap(),
                GroupId(id)
            );
        }
    }

    #[test]
    fn chain_is_not_closed() {
        // A-B nearby, B-C nearby, A-C apart
        let registry = registry_with(&[(0.0, 0.0), (0.4, 0.4), (0.8, 0.8)]);
        let engine = GroupingEngine::default();

        // C only sees B, which is still in its own group
        let c = engine.resolve_group(&registry, ParticipantId(2)).unwrap();
        assert_eq!(c, GroupId(1));
        assert_ne!(c, GroupId(0));

        // A sees B first and adopts B's group
        let a = engine.resolve_group(&registry, ParticipantId(0)).unwrap();
        assert_eq!(a, GroupId(1));
    }

    #[test]
    fn chain_follows_last_written_group() {
        let registry = registry_with(&[(0.0, 0.0), (0.4, 0.4), (0.8, 0.8)]);
        let engine = GroupingEngine::default();

        // B scans A first (ascending id) and takes group 0
        assert_eq!(engine.resolve_group(&registry, ParticipantId(1)).unwrap(), GroupId(0));
        // C now inherits whatever B carries
        assert_eq!(engine.resolve_group(&registry, ParticipantId(2)).unwrap(), GroupId(0));
    }

    #[test]
    fn first_neighbor_in_id_order_wins() {
        // Both 1 and 2 are near 0; 1 comes first
        let registry = registry_with(&[(1.0, 1.0), (1.3, 1.0), (0.8, 1.2)]);
        let engine = GroupingEngine::default();
        assert_eq!(engine.resolve_group(&registry, ParticipantId(0)).unwrap(), GroupId(1));
    }

    #[test]
    fn unknown_participant() {
        let registry = registry_with(&[(0.0, 0.0)]);
        let engine = GroupingEngine::default();
        assert_eq!(
            engine.resolve_group(&registry, ParticipantId(3)),
            Err(CoreError::NotFound(ParticipantId(3)))
        );
    }

    #[test]
    fn custom_threshold() {
        let registry = registry_with(&[(0.0, 0.0), (0.9, 0.9)]);
        assert_eq!(
            GroupingEngine::new(0.5).resolve_group(&registry, ParticipantId(0)).unwrap(),
            GroupId(0)
        );
        assert_eq!(
            GroupingEngine::new(1.0).resolve_group(&registry, ParticipantId(0)).unwrap(),
            GroupId(1)
        );
    }

    #[test]
    fn concurrent_resolution_stays_consistent() {
        let positions: Vec<(f64, f64)> = (0..50)
            .map(|i| ((i % 10) as f64 * 0.3, (i / 10) as f64 * 0.3))
            .collect();
        let registry = registry_with(&positions);
        let engine = GroupingEngine::default();

        std::thread::scope(|s| {
            for t in 0..4u64 {
                let registry = &registry;
                s.spawn(move || {
                    for round in 0..20u64 {
                        let id = ParticipantId((t * 13 + round * 7) % 50);
                        let group = engine.resolve_group(registry, id).unwrap();
                        assert!(group.value() < 50);
                    }
                });
            }
        });

        // Every stored group still names a registered participant
        for p in registry.snapshot() {
            assert!(registry.contains(ParticipantId(p.group.value())));
        }
    }

    proptest! {
        #[test]
        fn repeated_resolution_is_stable(
            points in proptest::collection::vec((0.0f64..5.0, 0.0f64..5.0), 1..40),
            pick in any::<prop::sample::Index>(),
        ) {
            let registry = registry_with(&points);
            let engine = GroupingEngine::default();
            let id = ParticipantId(pick.index(points.len()) as u64);

            let first = engine.resolve_group(&registry, id).unwrap();
            let second = engine.resolve_group(&registry, id).unwrap();
            let third = engine.resolve_group(&registry, id).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(second, third);
        }

        #[test]
        fn result_is_own_id_or_a_neighbors_group(
            points in proptest::collection::vec((0.0f64..3.0, 0.0f64..3.0), 1..30),
            pick in any::<prop::sample::Index>(),
        ) {
            let registry = registry_with(&points);
            let engine = GroupingEngine::default();
            let id = ParticipantId(pick.index(points.len()) as u64);
            let before = registry.snapshot();
            let subject = before[id.value() as usize].position;

            let group = engine.resolve_group(&registry, id).unwrap();
            let from_neighbor = before
                .iter()
                .any(|p| p.id != id && p.position.is_near(&subject, 0.5) && p.group == group);
            prop_assert!(group == GroupId::from(id) || from_neighbor);
        }
    }
}
