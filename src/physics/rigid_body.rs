//! Rigid body integration functions.

use glam::Vec3;

use crate::ecs::store::PhysicsStore;

/// Speed below which a body is considered at rest and snapped to zero.
pub const REST_SPEED_EPSILON: f32 = 0.01;
/// Bodies falling below this height are respawned.
pub const WORLD_FLOOR: f32 = -100.0;
/// Height a fallen body is teleported back to.
pub const RESPAWN_HEIGHT: f32 = 10.0;

/// Apply gravity and accumulated forces to velocities, then drag.
///
/// Only non-kinematic bodies with an enabled collider are integrated. Force
/// and torque accumulators are cleared on every body.
pub fn integrate_forces<S: PhysicsStore>(store: &mut S, gravity: Vec3, dt: f32) {
    store.for_each_body(|_, _, rb, collider| {
        let simulated = !rb.is_kinematic() && collider.is_some_and(|c| c.enabled);

        if simulated {
            if rb.use_gravity {
                rb.force_accumulator += gravity * rb.mass;
            }

            // v += (F/m) * dt
            rb.linear_velocity += rb.force_accumulator / rb.mass * dt;

            // Rest snap applies to dragged bodies only.
            if rb.linear_velocity.length() > REST_SPEED_EPSILON {
                rb.linear_velocity *= (1.0 - rb.drag * dt).max(0.0);
                if rb.linear_velocity.length() < REST_SPEED_EPSILON {
                    rb.linear_velocity = Vec3::ZERO;
                }
            }
        }

        rb.force_accumulator = Vec3::ZERO;
        rb.torque_accumulator = Vec3::ZERO;
    });
}

/// Integrate positions: p += v * dt, for every non-kinematic body.
///
/// Returns the number of bodies respawned after falling below [`WORLD_FLOOR`].
pub fn integrate_positions<S: PhysicsStore>(store: &mut S, dt: f32) -> usize {
    let mut respawned = 0;
    store.for_each_body(|entity, transform, rb, _| {
        if rb.is_kinematic() {
            return;
        }

        transform.position += rb.linear_velocity * dt;

        if transform.position.y < WORLD_FLOOR {
            tracing::warn!(
                ?entity,
                y = transform.position.y,
                "body fell below world floor, respawning"
            );
            transform.position.y = RESPAWN_HEIGHT;
            rb.linear_velocity = Vec3::ZERO;
            respawned += 1;
        }
    });
    respawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::{Collider, RigidBody};
    use crate::ecs::components::transform::Transform;

    const DT: f32 = 1.0 / 60.0;
    const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

    fn spawn_body(world: &mut hecs::World, position: Vec3, rb: RigidBody) -> hecs::Entity {
        world.spawn((Transform::from_position(position), rb, Collider::sphere(0.5)))
    }

    #[test]
    fn test_gravity_single_step() {
        let mut world = hecs::World::new();
        let entity = spawn_body(&mut world, Vec3::ZERO, RigidBody::new_dynamic(3.0));

        integrate_forces(&mut world, GRAVITY, DT);

        let rb = world.get::<&RigidBody>(entity).unwrap();
        assert!((rb.linear_velocity - GRAVITY * DT).length() < 1e-5);
        assert_eq!(rb.force_accumulator, Vec3::ZERO);
    }

    #[test]
    fn test_free_fall() {
        let mut world = hecs::World::new();
        let entity = spawn_body(&mut world, Vec3::new(0.0, 10.0, 0.0), RigidBody::new_dynamic(1.0));

        // Simulate 1 second (60 steps)
        for _ in 0..60 {
            integrate_forces(&mut world, GRAVITY, DT);
            integrate_positions(&mut world, DT);
        }

        let transform = world.get::<&Transform>(entity).unwrap();
        // Semi-implicit Euler lands slightly below the analytic 5.095
        assert!(
            (transform.position.y - 5.0).abs() < 0.2,
            "unexpected height: y = {}",
            transform.position.y
        );
        let eps = 1e-5;
        assert!(transform.position.x.abs() < eps);
        assert!(transform.position.z.abs() < eps);
    }

    #[test]
    fn test_kinematic_body_unaffected() {
        let mut world = hecs::World::new();
        let mut rb = RigidBody::new_kinematic(1.0);
        rb.use_gravity = true;
        rb.linear_velocity = Vec3::X;
        let entity = spawn_body(&mut world, Vec3::ZERO, rb);

        for _ in 0..60 {
            integrate_forces(&mut world, GRAVITY, DT);
            integrate_positions(&mut world, DT);
        }

        let transform = world.get::<&Transform>(entity).unwrap();
        let rb = world.get::<&RigidBody>(entity).unwrap();
        assert_eq!(transform.position, Vec3::ZERO);
        assert_eq!(rb.linear_velocity, Vec3::X);
    }

    #[test]
    fn test_disabled_collider_skips_forces() {
        let mut world = hecs::World::new();
        let entity = world.spawn((
            Transform::identity(),
            RigidBody::new_dynamic(1.0),
            Collider::sphere(0.5).disabled(),
        ));

        integrate_forces(&mut world, GRAVITY, DT);
        assert_eq!(
            world.get::<&RigidBody>(entity).unwrap().linear_velocity,
            Vec3::ZERO
        );
    }

    #[test]
    fn test_drag_and_rest_snap() {
        let mut world = hecs::World::new();

        let mut slow = RigidBody::new_dynamic(1.0);
        slow.use_gravity = false;
        slow.linear_velocity = Vec3::new(0.005, 0.0, 0.0);
        let slow = spawn_body(&mut world, Vec3::ZERO, slow);

        // Drag 0.6 takes 0.0101 below the rest speed in one step.
        let mut settling = RigidBody::new_dynamic(1.0);
        settling.use_gravity = false;
        settling.drag = 0.6;
        settling.linear_velocity = Vec3::new(0.0101, 0.0, 0.0);
        let settling = spawn_body(&mut world, Vec3::new(-5.0, 0.0, 0.0), settling);

        let mut dragged = RigidBody::new_dynamic(1.0);
        dragged.use_gravity = false;
        dragged.drag = 6.0;
        dragged.linear_velocity = Vec3::new(10.0, 0.0, 0.0);
        let dragged = spawn_body(&mut world, Vec3::new(5.0, 0.0, 0.0), dragged);

        integrate_forces(&mut world, GRAVITY, DT);

        // Never dragged, so never snapped.
        assert_eq!(
            world.get::<&RigidBody>(slow).unwrap().linear_velocity,
            Vec3::new(0.005, 0.0, 0.0)
        );
        assert_eq!(world.get::<&RigidBody>(settling).unwrap().linear_velocity, Vec3::ZERO);
        // 10 * (1 - 6/60)
        let v = world.get::<&RigidBody>(dragged).unwrap().linear_velocity;
        assert!((v.x - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_weak_forces_build_up_speed() {
        let mut world = hecs::World::new();
        // 0.5 * dt is well under the rest speed every single step.
        let weak_gravity = Vec3::new(0.0, -0.5, 0.0);
        let faller = spawn_body(&mut world, Vec3::new(0.0, 5.0, 0.0), RigidBody::new_dynamic(1.0));

        let mut pushed = RigidBody::new_dynamic(1.0);
        pushed.use_gravity = false;
        let pushed = spawn_body(&mut world, Vec3::new(10.0, 0.0, 0.0), pushed);

        for _ in 0..600 {
            world
                .get::<&mut RigidBody>(pushed)
                .unwrap()
                .add_force(Vec3::new(0.5, 0.0, 0.0));
            integrate_forces(&mut world, weak_gravity, DT);
            integrate_positions(&mut world, DT);
        }

        // 0.5 * 10^2 / 2 = 25
        let y = world.get::<&Transform>(faller).unwrap().position.y;
        assert!(y < -10.0, "body should have fallen: y = {y}");
        let x = world.get::<&Transform>(pushed).unwrap().position.x;
        assert!(x > 25.0, "body should have been pushed: x = {x}");
    }

    #[test]
    fn test_accumulated_force_integrated_and_cleared() {
        let mut world = hecs::World::new();
        let mut rb = RigidBody::new_dynamic(2.0);
        rb.use_gravity = false;
        rb.add_force(Vec3::new(120.0, 0.0, 0.0));
        rb.add_torque(Vec3::Y);
        let entity = spawn_body(&mut world, Vec3::ZERO, rb);

        integrate_forces(&mut world, GRAVITY, DT);

        let rb = world.get::<&RigidBody>(entity).unwrap();
        // (120 / 2) / 60
        assert!((rb.linear_velocity.x - 1.0).abs() < 1e-5);
        assert_eq!(rb.force_accumulator, Vec3::ZERO);
        assert_eq!(rb.torque_accumulator, Vec3::ZERO);
        assert_eq!(rb.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_fall_through_respawn() {
        let mut world = hecs::World::new();
        let mut rb = RigidBody::new_dynamic(1.0);
        rb.linear_velocity = Vec3::new(1.0, -30.0, 0.0);
        let entity = spawn_body(&mut world, Vec3::new(4.0, -99.9, 0.0), rb);

        assert_eq!(integrate_positions(&mut world, DT), 1);

        let transform = world.get::<&Transform>(entity).unwrap();
        let rb = world.get::<&RigidBody>(entity).unwrap();
        assert_eq!(transform.position.y, RESPAWN_HEIGHT);
        assert!((transform.position.x - (4.0 + DT)).abs() < 1e-5);
        assert_eq!(rb.linear_velocity, Vec3::ZERO);
    }
}
