//! Shared setup helpers for rein-physics benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- broadphase
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- pipeline

use glam::Vec3;
use rein_physics::physics::contact::ContactInfo;
use rein_physics::{Collider, CollisionInfo, PhysicsConfig, PhysicsWorld, RigidBody, Transform};

// ---------------------------------------------------------------------------
// Basic scenes
// ---------------------------------------------------------------------------

/// Spawn `n` dynamic sphere bodies in a grid layout so neighbours overlap.
pub fn setup_sphere_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    for i in 0..n {
        let x = (i % cols) as f32 * 1.5;
        let z = (i / cols) as f32 * 1.5;

        world.spawn((
            Transform::from_position(Vec3::new(x, 0.0, z)),
            RigidBody::new_dynamic(1.0),
            Collider::sphere(1.0),
        ));
    }
    world
}

/// Mixed scene: half dynamic spheres, half static boxes.
#[allow(clippy::manual_is_multiple_of)]
pub fn setup_mixed_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    for i in 0..n {
        let x = (i % cols) as f32 * 1.5;
        let z = (i / cols) as f32 * 1.5;
        let pos = Vec3::new(x, 0.0, z);

        if i % 2 == 0 {
            world.spawn((
                Transform::from_position(pos),
                RigidBody::new_dynamic(1.0),
                Collider::sphere(1.0),
            ));
        } else {
            world.spawn((Transform::from_position(pos), Collider::cuboid(Vec3::ONE)));
        }
    }
    world
}

/// Sparse scene: bodies spread far apart (no overlaps).
pub fn setup_sparse_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let cols = (n as f32).sqrt().ceil() as usize;

    for i in 0..n {
        let x = (i % cols) as f32 * 10.0;
        let z = (i / cols) as f32 * 10.0;

        world.spawn((
            Transform::from_position(Vec3::new(x, 0.0, z)),
            RigidBody::new_dynamic(1.0),
            Collider::sphere(0.5),
        ));
    }
    world
}

/// Ground box + `n` dynamic bodies above it (mixed spheres/boxes).
#[allow(clippy::manual_is_multiple_of)]
pub fn setup_scene(n: usize) -> (hecs::World, PhysicsWorld) {
    let mut world = hecs::World::new();
    let physics = PhysicsWorld::new(PhysicsConfig::default());

    world.spawn((
        Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
        Collider::cuboid(Vec3::new(200.0, 1.0, 200.0)),
    ));

    let cols = (n as f32).sqrt().ceil() as usize;
    for i in 0..n {
        let x = (i % cols) as f32 * 2.0 - (cols as f32);
        let z = (i / cols) as f32 * 2.0 - (cols as f32);
        let y = 1.0 + (i % 5) as f32 * 1.5;

        let collider = if i % 2 == 0 {
            Collider::sphere(0.5)
        } else {
            Collider::cuboid(Vec3::splat(0.8))
        };
        world.spawn((
            Transform::from_position(Vec3::new(x, y, z)),
            RigidBody::new_dynamic(1.0),
            collider,
        ));
    }

    (world, physics)
}

// ---------------------------------------------------------------------------
// Solver setup
// ---------------------------------------------------------------------------

/// A column of `n` slightly interpenetrating boxes on a static ground, with
/// the matching collisions already detected.
pub fn setup_contacts(n: usize) -> (hecs::World, Vec<CollisionInfo<hecs::Entity>>) {
    let mut world = hecs::World::new();
    let mut entities = Vec::with_capacity(n + 1);

    entities.push(world.spawn((
        Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
        Collider::cuboid(Vec3::new(100.0, 1.0, 100.0)),
    )));

    for i in 0..n {
        let mut rb = RigidBody::new_dynamic(1.0);
        rb.linear_velocity = Vec3::new(0.0, -1.0, 0.0);
        entities.push(world.spawn((
            Transform::from_position(Vec3::new(0.0, 0.45 + i as f32 * 0.95, 0.0)),
            rb,
            Collider::cuboid(Vec3::ONE),
        )));
    }

    let collisions = entities
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let contact = ContactInfo {
                normal: Vec3::Y,
                penetration: 0.05,
                point: Vec3::new(0.0, i as f32 * 0.95, 0.0),
            };
            CollisionInfo::new(pair[0], pair[1], contact, false)
        })
        .collect();

    (world, collisions)
}
