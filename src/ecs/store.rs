//! Component store contract consumed by the physics step.
//!
//! Physics code only talks to entities through [`PhysicsStore`], so the
//! simulation does not care whether components live in a `hecs` archetype
//! table, a generational arena or a hashmap. `hecs::World` is the shipped
//! implementation.

use std::fmt;

use glam::Vec3;

use super::components::physics::{Collider, RigidBody};
use super::components::transform::Transform;

/// Rigid body state captured alongside a collider snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub linear_velocity: Vec3,
    pub is_kinematic: bool,
}

/// One entity possessing both a transform and a collider, copied out of the store.
#[derive(Debug, Clone)]
pub struct ColliderEntry<E> {
    pub entity: E,
    pub transform: Transform,
    pub collider: Collider,
    /// Present when the entity also carries a [`RigidBody`].
    pub body: Option<BodyState>,
}

/// Entity/component storage as seen by the physics world.
pub trait PhysicsStore {
    /// Entity identifier. Equality is identity.
    type Entity: Copy + Eq + fmt::Debug;

    /// Whether `entity` is still alive.
    fn contains(&self, entity: Self::Entity) -> bool;

    /// Append a snapshot of every entity with Transform + Collider to `out`.
    fn collect_colliders(&self, out: &mut Vec<ColliderEntry<Self::Entity>>);

    /// Visit every entity with Transform + RigidBody, mutably.
    fn for_each_body<F>(&mut self, f: F)
    where
        F: FnMut(Self::Entity, &mut Transform, &mut RigidBody, Option<&Collider>);

    /// Mutable access to one entity's Transform + RigidBody.
    ///
    /// Returns `None` if the entity is dead or lacks either component.
    fn with_body<R, F>(&mut self, entity: Self::Entity, f: F) -> Option<R>
    where
        F: FnOnce(&mut Transform, &mut RigidBody) -> R;

    fn transform(&self, entity: Self::Entity) -> Option<Transform>;

    fn rigid_body(&self, entity: Self::Entity) -> Option<RigidBody>;

    fn has_rigid_body(&self, entity: Self::Entity) -> bool {
        self.rigid_body(entity).is_some()
    }

    /// Attach a rigid body. Returns `false` if the entity does not exist.
    fn insert_rigid_body(&mut self, entity: Self::Entity, body: RigidBody) -> bool;

    /// Attach a collider. Returns `false` if the entity does not exist.
    fn insert_collider(&mut self, entity: Self::Entity, collider: Collider) -> bool;
}

impl PhysicsStore for hecs::World {
    type Entity = hecs::Entity;

    fn contains(&self, entity: hecs::Entity) -> bool {
        hecs::World::contains(self, entity)
    }

    fn collect_colliders(&self, out: &mut Vec<ColliderEntry<hecs::Entity>>) {
        for (entity, (transform, collider, rb)) in self
            .query::<(&Transform, &Collider, Option<&RigidBody>)>()
            .iter()
        {
            out.push(ColliderEntry {
                entity,
                transform: *transform,
                collider: collider.clone(),
                body: rb.map(|rb| BodyState {
                    linear_velocity: rb.linear_velocity,
                    is_kinematic: rb.is_kinematic(),
                }),
            });
        }
    }

    fn for_each_body<F>(&mut self, mut f: F)
    where
        F: FnMut(hecs::Entity, &mut Transform, &mut RigidBody, Option<&Collider>),
    {
        for (entity, (transform, rb, collider)) in
            self.query_mut::<(&mut Transform, &mut RigidBody, Option<&Collider>)>()
        {
            f(entity, transform, rb, collider);
        }
    }

    fn with_body<R, F>(&mut self, entity: hecs::Entity, f: F) -> Option<R>
    where
        F: FnOnce(&mut Transform, &mut RigidBody) -> R,
    {
        self.query_one_mut::<(&mut Transform, &mut RigidBody)>(entity)
            .ok()
            .map(|(transform, rb)| f(transform, rb))
    }

    fn transform(&self, entity: hecs::Entity) -> Option<Transform> {
        self.get::<&Transform>(entity).ok().map(|t| *t)
    }

    fn rigid_body(&self, entity: hecs::Entity) -> Option<RigidBody> {
        self.get::<&RigidBody>(entity).ok().map(|rb| (*rb).clone())
    }

    fn has_rigid_body(&self, entity: hecs::Entity) -> bool {
        self.get::<&RigidBody>(entity).is_ok()
    }

    fn insert_rigid_body(&mut self, entity: hecs::Entity, body: RigidBody) -> bool {
        self.insert_one(entity, body).is_ok()
    }

    fn insert_collider(&mut self, entity: hecs::Entity, collider: Collider) -> bool {
        self.insert_one(entity, collider).is_ok()
    }
}
