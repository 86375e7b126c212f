//! Rein Physics
//!
//! Fixed-step rigid body physics for the rein engine's ECS.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **ecs** - Components (transform, rigid body, collider) and the
//!    [`PhysicsStore`] seam over `hecs::World`
//! 2. **physics** - Timestep scheduler, collision detection, solver,
//!    integration and debug wireframes
//!
//! # Example
//!
//! ```
//! use rein_physics::glam::Vec3;
//! use rein_physics::{
//!     spawn_rigid_body, spawn_static_collider, Collider, PhysicsConfig, PhysicsWorld, RigidBody,
//!     Transform,
//! };
//!
//! let mut world = rein_physics::hecs::World::new();
//! spawn_static_collider(
//!     &mut world,
//!     Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
//!     Collider::cuboid(Vec3::new(20.0, 1.0, 20.0)),
//! );
//! let ball = spawn_rigid_body(
//!     &mut world,
//!     Transform::from_position(Vec3::new(0.0, 5.0, 0.0)),
//!     RigidBody::new_dynamic(1.0),
//!     Collider::sphere(0.5),
//! );
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default());
//! let steps = physics.advance(&mut world, 1.0 / 30.0);
//! assert_eq!(steps, 2);
//! assert!(world.get::<&Transform>(ball).unwrap().position.y < 5.0);
//! ```

pub mod ecs;
pub mod physics;

pub use ecs::prelude::*;

pub use physics::{
    CollisionInfo, ConfigError, ContactBuffer, PhysicsConfig, PhysicsWorld, TriggerEvent,
};

pub use physics::debug::{collect_debug_lines, DebugLine};

#[cfg(feature = "debug-draw")]
pub use physics::debug::{lines_to_vertices, DebugVertex};

// Re-export glam and hecs for convenience
pub use glam;
pub use hecs;
