//! Helpers for spawning physics entities into a `hecs::World`.

use crate::ecs::components::physics::{Collider, RigidBody};
use crate::ecs::components::transform::Transform;

/// Spawn an entity simulated by the physics world.
///
/// Creates an entity with Transform, RigidBody and Collider components.
pub fn spawn_rigid_body(
    world: &mut hecs::World,
    transform: Transform,
    body: RigidBody,
    collider: Collider,
) -> hecs::Entity {
    world.spawn((transform, body, collider))
}

/// Spawn a collider without a rigid body.
///
/// Such entities take part in collision detection but are immovable.
pub fn spawn_static_collider(
    world: &mut hecs::World,
    transform: Transform,
    collider: Collider,
) -> hecs::Entity {
    world.spawn((transform, collider))
}
