//! Contact data structures for collision response.

use glam::Vec3;

/// Geometric result of a narrowphase test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactInfo {
    /// Unit contact normal (from shape A to shape B).
    pub normal: Vec3,
    /// Penetration depth, never negative.
    pub penetration: f32,
    /// Contact point in world space.
    pub point: Vec3,
}

impl ContactInfo {
    /// The same contact seen from the other shape.
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// A detected overlap between two entities for the current fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo<E> {
    pub entity_a: E,
    pub entity_b: E,
    pub point: Vec3,
    /// Unit normal pointing from A toward B.
    pub normal: Vec3,
    pub penetration: f32,
    /// Velocity of B minus velocity of A at detection time. Zero unless both
    /// entities carry rigid bodies and the pair is solid.
    pub relative_velocity: Vec3,
    pub is_trigger: bool,
}

impl<E> CollisionInfo<E> {
    pub fn new(entity_a: E, entity_b: E, contact: ContactInfo, is_trigger: bool) -> Self {
        Self {
            entity_a,
            entity_b,
            point: contact.point,
            normal: contact.normal,
            penetration: contact.penetration,
            relative_velocity: Vec3::ZERO,
            is_trigger,
        }
    }
}

/// Emitted once per trigger pair per fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent<E> {
    pub entity_a: E,
    pub entity_b: E,
}

/// Per-step contact buffer handed from detection to resolution.
///
/// Cleared at the start of every fixed step; never carries contacts across steps.
#[derive(Debug, Clone)]
pub struct ContactBuffer<E> {
    pub collisions: Vec<CollisionInfo<E>>,
    pub triggers: Vec<CollisionInfo<E>>,
}

impl<E> ContactBuffer<E> {
    pub fn new() -> Self {
        Self {
            collisions: Vec::new(),
            triggers: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.collisions.clear();
        self.triggers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.collisions.is_empty() && self.triggers.is_empty()
    }

    /// Route a collision into the trigger or solid list.
    pub fn push(&mut self, info: CollisionInfo<E>) {
        if info.is_trigger {
            self.triggers.push(info);
        } else {
            self.collisions.push(info);
        }
    }
}

impl<E> Default for ContactBuffer<E> {
    fn default() -> Self {
        Self::new()
    }
}
