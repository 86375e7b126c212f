//! Broadphase pair enumeration.

use crate::ecs::store::{ColliderEntry, PhysicsStore};

use super::contact::{CollisionInfo, ContactBuffer};
use super::narrowphase::detect_collision;

/// Brute-force all-pairs broadphase.
///
/// Every unordered pair of colliders is tested exactly once per step. The
/// collider snapshot is rebuilt from scratch each time; only its allocation
/// is reused.
pub struct BroadPhase<E> {
    entries: Vec<ColliderEntry<E>>,
}

impl<E> Default for BroadPhase<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> BroadPhase<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of colliders in the most recent snapshot.
    pub fn collider_count(&self) -> usize {
        self.entries.len()
    }
}

impl<E: Copy> BroadPhase<E> {
    /// Snapshot all colliders in `store`, run the narrowphase on every pair
    /// and push positive results into `contacts`.
    ///
    /// Pairs where either collider is disabled are skipped. A pair involving a
    /// trigger is routed to the trigger list. Solid pairs between two rigid
    /// bodies record the relative velocity (B minus A).
    pub fn find_collisions<S>(&mut self, store: &S, contacts: &mut ContactBuffer<E>)
    where
        S: PhysicsStore<Entity = E>,
    {
        self.entries.clear();
        store.collect_colliders(&mut self.entries);

        // O(n^2) brute force
        for i in 0..self.entries.len() {
            for j in (i + 1)..self.entries.len() {
                let a = &self.entries[i];
                let b = &self.entries[j];

                if !a.collider.enabled || !b.collider.enabled {
                    continue;
                }

                let Some(contact) =
                    detect_collision(&a.collider, &a.transform, &b.collider, &b.transform)
                else {
                    continue;
                };

                let is_trigger = a.collider.is_trigger || b.collider.is_trigger;
                let mut info = CollisionInfo::new(a.entity, b.entity, contact, is_trigger);
                if !is_trigger {
                    if let (Some(body_a), Some(body_b)) = (a.body, b.body) {
                        info.relative_velocity = body_b.linear_velocity - body_a.linear_velocity;
                    }
                }
                contacts.push(info);
            }
        }
    }
}
