//! Iterative impulse solver with soft positional correction.

use glam::Vec3;

use crate::ecs::components::physics::RigidBody;
use crate::ecs::store::PhysicsStore;

use super::contact::{CollisionInfo, TriggerEvent};

/// Penetration tolerated before positional correction kicks in.
pub const PENETRATION_SLOP: f32 = 0.01;
/// Fraction of the remaining penetration removed per correction.
pub const CORRECTION_FACTOR: f32 = 0.2;
/// Coefficient of restitution used for every contact.
pub const RESTITUTION: f32 = 0.2;
/// Upper bound on a single normal impulse.
pub const MAX_IMPULSE: f32 = 10.0;
/// Upper bound on body speed after an impulse.
pub const MAX_SPEED: f32 = 50.0;

/// Turn trigger overlaps into events. Triggers never get a physical response.
pub fn report_triggers<E>(triggers: &[CollisionInfo<E>], events: &mut Vec<TriggerEvent<E>>)
where
    E: Copy + std::fmt::Debug,
{
    for trigger in triggers {
        tracing::trace!(a = ?trigger.entity_a, b = ?trigger.entity_b, "trigger detected");
        events.push(TriggerEvent {
            entity_a: trigger.entity_a,
            entity_b: trigger.entity_b,
        });
    }
}

/// Resolve solid collisions, re-visiting every contact `iterations` times.
///
/// Contacts are not re-detected between iterations.
pub fn solve_collisions<S: PhysicsStore>(
    collisions: &[CollisionInfo<S::Entity>],
    store: &mut S,
    iterations: u32,
) {
    if collisions.is_empty() {
        return;
    }
    for _ in 0..iterations {
        for collision in collisions {
            resolve_collision(collision, store);
        }
    }
}

fn resolve_collision<S: PhysicsStore>(collision: &CollisionInfo<S::Entity>, store: &mut S) {
    let entity_a = collision.entity_a;
    let entity_b = collision.entity_b;

    // Either side may have been destroyed by game logic since detection.
    if !store.contains(entity_a) || !store.contains(entity_b) {
        return;
    }

    // Entities without a rigid body are immovable.
    let rb_a = store.rigid_body(entity_a).map(|rb| RbData::from_rb(&rb));
    let rb_b = store.rigid_body(entity_b).map(|rb| RbData::from_rb(&rb));
    let inv_mass_a = rb_a.map_or(0.0, |d| d.inv_mass);
    let inv_mass_b = rb_b.map_or(0.0, |d| d.inv_mass);
    let inv_mass_sum = inv_mass_a + inv_mass_b;

    if inv_mass_sum <= 0.0 {
        return;
    }

    let normal = collision.normal;

    if collision.penetration > PENETRATION_SLOP {
        let correction =
            normal * (collision.penetration - PENETRATION_SLOP) * CORRECTION_FACTOR / inv_mass_sum;
        if inv_mass_a > 0.0 {
            store.with_body(entity_a, |transform, _| {
                transform.position -= correction * inv_mass_a;
            });
        }
        if inv_mass_b > 0.0 {
            store.with_body(entity_b, |transform, _| {
                transform.position += correction * inv_mass_b;
            });
        }
    }

    // Impulses only between two dynamic bodies.
    let (Some(a), Some(b)) = (rb_a, rb_b) else {
        return;
    };
    if a.inv_mass == 0.0 || b.inv_mass == 0.0 {
        return;
    }

    let velocity_along_normal = (b.linear_velocity - a.linear_velocity).dot(normal);
    if velocity_along_normal >= 0.0 {
        // Already separating
        return;
    }

    let j = (-(1.0 + RESTITUTION) * velocity_along_normal / inv_mass_sum).min(MAX_IMPULSE);
    let impulse = normal * j;

    apply_impulse(store, entity_a, -impulse);
    apply_impulse(store, entity_b, impulse);
}

/// Apply an impulse to one body and clamp its resulting speed.
fn apply_impulse<S: PhysicsStore>(store: &mut S, entity: S::Entity, impulse: Vec3) {
    store.with_body(entity, |_, rb| {
        rb.add_impulse(impulse);
        rb.linear_velocity = rb.linear_velocity.clamp_length_max(MAX_SPEED);
    });
}

/// Rigid body data cached for solver calculations.
#[derive(Debug, Clone, Copy)]
struct RbData {
    inv_mass: f32,
    linear_velocity: Vec3,
}

impl RbData {
    fn from_rb(rb: &RigidBody) -> Self {
        Self {
            inv_mass: rb.inverse_mass(),
            linear_velocity: rb.linear_velocity,
        }
    }
}
