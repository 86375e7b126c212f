//! Headless physics sandbox.
//!
//! Drops a handful of bodies onto a ground box, runs a trigger zone over the
//! landing area and feeds the world uneven frame times.
//!
//!   RUST_LOG=info cargo run --manifest-path rein-sandbox/Cargo.toml -- [seconds]

use anyhow::Context;
use glam::Vec3;
use rein_physics::{
    collect_debug_lines, spawn_rigid_body, spawn_static_collider, Collider, PhysicsConfig,
    PhysicsWorld, RigidBody, Transform,
};

/// Frame times cycled through to mimic a jittery render loop.
const FRAME_TIMES: [f64; 6] = [
    1.0 / 60.0,
    1.0 / 144.0,
    1.0 / 30.0,
    1.0 / 60.0,
    1.0 / 90.0,
    0.25,
];

struct Sandbox {
    world: hecs::World,
    physics: PhysicsWorld,
    bodies: Vec<hecs::Entity>,
}

impl Sandbox {
    fn new(config: PhysicsConfig) -> anyhow::Result<Self> {
        let mut physics = PhysicsWorld::default();
        config.validate().context("invalid physics config")?;
        physics.initialize(config);

        let mut world = hecs::World::new();

        // Ground
        spawn_static_collider(
            &mut world,
            Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
            Collider::cuboid(Vec3::new(20.0, 1.0, 20.0)),
        );

        // Trigger zone around the landing area
        spawn_static_collider(
            &mut world,
            Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
            Collider::cuboid(Vec3::new(4.0, 2.0, 4.0)).as_trigger(),
        );

        let mut bodies = Vec::new();
        for i in 0..6 {
            let x = (i % 3) as f32 * 1.5 - 1.5;
            let y = 3.0 + (i / 3) as f32 * 2.0;
            let collider = if i % 2 == 0 {
                Collider::sphere(0.5)
            } else {
                Collider::cuboid(Vec3::splat(0.8))
            };
            bodies.push(spawn_rigid_body(
                &mut world,
                Transform::from_position(Vec3::new(x, y, 0.0)),
                RigidBody::new_dynamic(1.0 + i as f32 * 0.5),
                collider,
            ));
        }

        // A kinematic paddle that only moves when game code moves it
        let mut paddle = RigidBody::new_kinematic(5.0);
        paddle.linear_velocity = Vec3::X;
        bodies.push(spawn_rigid_body(
            &mut world,
            Transform::from_position(Vec3::new(-4.0, 0.5, 0.0)),
            paddle,
            Collider::cuboid(Vec3::new(1.0, 0.5, 3.0)),
        ));

        Ok(Self {
            world,
            physics,
            bodies,
        })
    }

    fn run(&mut self, seconds: f64) {
        let mut elapsed = 0.0;
        let mut frame = 0usize;
        let mut steps = 0u32;

        while elapsed < seconds {
            let dt = FRAME_TIMES[frame % FRAME_TIMES.len()];
            steps += self.physics.advance(&mut self.world, dt);
            elapsed += dt;
            frame += 1;

            for event in self.physics.drain_trigger_events() {
                log::debug!("trigger {:?} <-> {:?}", event.entity_a, event.entity_b);
            }

            if frame % 30 == 0 {
                self.report(elapsed);
            }
        }

        log::info!(
            "ran {frame} frames, {steps} fixed steps, residual {:.4}s",
            self.physics.accumulator()
        );
        self.report(elapsed);

        let lines = collect_debug_lines(&self.world);
        log::info!("debug wireframe: {} lines", lines.len());
    }

    fn report(&self, elapsed: f64) {
        log::info!(
            "t={elapsed:.2}s collisions={} triggers={}",
            self.physics.collisions().len(),
            self.physics.triggers().len()
        );
        for &entity in &self.bodies {
            if let Ok(transform) = self.world.get::<&Transform>(entity) {
                let p = transform.position;
                log::info!("  {entity:?} at ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let seconds = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<f64>()
            .with_context(|| format!("expected a duration in seconds, got {arg:?}"))?,
        None => 3.0,
    };

    let mut sandbox = Sandbox::new(PhysicsConfig::default())?;
    sandbox.run(seconds);
    sandbox.physics.shutdown();
    Ok(())
}
