//! CPU-based physics with rigid body simulation and collision detection.
//!
//! # Architecture
//!
//! Frame time is fed to a fixed timestep accumulator. Each fixed step runs:
//!
//! 1. Clear last step's contacts
//! 2. Apply forces (gravity, accumulated forces, drag)
//! 3. Broadphase collision detection (all pairs)
//! 4. Narrowphase collision detection (AABB and sphere tests)
//! 5. Report trigger overlaps
//! 6. Resolve solid contacts (positional correction and impulses)
//! 7. Integrate positions

pub mod broadphase;
pub mod collider;
pub mod config;
pub mod contact;
pub mod debug;
pub mod narrowphase;
pub mod rigid_body;
pub mod scheduler;
pub mod solver;

pub use self::config::{ConfigError, PhysicsConfig};
pub use self::contact::{CollisionInfo, ContactBuffer, TriggerEvent};

use std::fmt::Debug;

use crate::ecs::store::PhysicsStore;

use self::broadphase::BroadPhase;
use self::scheduler::FixedTimestep;

/// Per-step working state, kept apart from the scheduler so the step closure
/// can borrow it mutably while the accumulator is advancing.
struct StepPipeline<E> {
    broadphase: BroadPhase<E>,
    contacts: ContactBuffer<E>,
    trigger_events: Vec<TriggerEvent<E>>,
}

impl<E> StepPipeline<E> {
    fn new() -> Self {
        Self {
            broadphase: BroadPhase::new(),
            contacts: ContactBuffer::new(),
            trigger_events: Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.contacts.clear();
        self.trigger_events.clear();
    }
}

impl<E: Copy + Debug> StepPipeline<E> {
    fn run<S: PhysicsStore<Entity = E>>(&mut self, store: &mut S, config: &PhysicsConfig) {
        let dt = config.fixed_timestep as f32;

        self.contacts.clear();

        rigid_body::integrate_forces(store, config.gravity, dt);

        self.broadphase.find_collisions(&*store, &mut self.contacts);

        solver::report_triggers(&self.contacts.triggers, &mut self.trigger_events);
        solver::solve_collisions(&self.contacts.collisions, store, config.solver_iterations);

        rigid_body::integrate_positions(store, dt);

        tracing::trace!(
            colliders = self.broadphase.collider_count(),
            collisions = self.contacts.collisions.len(),
            triggers = self.contacts.triggers.len(),
            "physics step"
        );
    }
}

/// The main physics world managing simulation state.
///
/// Generic over the entity handle of the [`PhysicsStore`] it steps; defaults
/// to `hecs::Entity`.
pub struct PhysicsWorld<E = hecs::Entity> {
    config: PhysicsConfig,
    timestep: FixedTimestep,
    pipeline: StepPipeline<E>,
    initialized: bool,
    playing: bool,
}

impl<E> Default for PhysicsWorld<E> {
    /// An uninitialized world. [`advance`](Self::advance) does nothing until
    /// [`initialize`](Self::initialize) is called.
    fn default() -> Self {
        Self {
            config: PhysicsConfig::default(),
            timestep: FixedTimestep::new(),
            pipeline: StepPipeline::new(),
            initialized: false,
            playing: true,
        }
    }
}

impl<E: Copy + Debug> PhysicsWorld<E> {
    /// Create an initialized, playing physics world.
    pub fn new(config: PhysicsConfig) -> Self {
        let mut world = Self::default();
        world.initialize(config);
        world
    }

    /// Install `config` and reset per-simulation state. Does nothing if the
    /// world is already initialized.
    pub fn initialize(&mut self, config: PhysicsConfig) {
        if self.initialized {
            tracing::debug!("physics world already initialized");
            return;
        }
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "initializing physics with an invalid config");
        }

        self.config = config;
        self.timestep.reset();
        self.pipeline.clear();
        self.initialized = true;

        tracing::info!(
            gravity = ?self.config.gravity,
            fixed_timestep = self.config.fixed_timestep,
            max_substeps = self.config.max_substeps,
            "physics world initialized"
        );
    }

    /// Drop all per-simulation state and mark the world uninitialized.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.timestep.reset();
        self.pipeline.clear();
        self.initialized = false;
        tracing::info!("physics world shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replace the config without validation. Takes effect on the next step.
    pub fn set_config(&mut self, config: PhysicsConfig) {
        self.config = config;
    }

    /// Replace the config if it passes [`PhysicsConfig::validate`].
    pub fn try_set_config(&mut self, config: PhysicsConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// While paused, frame time is neither accumulated nor stepped.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Residual frame time not yet consumed by a fixed step.
    pub fn accumulator(&self) -> f64 {
        self.timestep.accumulator()
    }

    /// Advance the simulation by `frame_delta` seconds of real time.
    ///
    /// Runs whole fixed steps, at most `max_substeps` per call, and carries
    /// the remainder to the next frame. Returns the number of steps run.
    pub fn advance<S>(&mut self, store: &mut S, frame_delta: f64) -> u32
    where
        S: PhysicsStore<Entity = E>,
    {
        if !self.initialized || !self.playing {
            return 0;
        }

        let config = &self.config;
        let pipeline = &mut self.pipeline;
        self.timestep.advance(
            frame_delta,
            config.fixed_timestep,
            config.max_substeps,
            || pipeline.run(store, config),
        )
    }

    /// Run exactly one fixed step, regardless of play state. Does nothing
    /// while the world is uninitialized.
    pub fn fixed_step<S>(&mut self, store: &mut S)
    where
        S: PhysicsStore<Entity = E>,
    {
        if !self.initialized {
            return;
        }
        self.pipeline.run(store, &self.config);
    }

    /// Solid collisions detected in the most recent step.
    pub fn collisions(&self) -> &[CollisionInfo<E>] {
        &self.pipeline.contacts.collisions
    }

    /// Trigger overlaps detected in the most recent step.
    pub fn triggers(&self) -> &[CollisionInfo<E>] {
        &self.pipeline.contacts.triggers
    }

    /// Take every trigger event reported since the last drain.
    pub fn drain_trigger_events(&mut self) -> Vec<TriggerEvent<E>> {
        std::mem::take(&mut self.pipeline.trigger_events)
    }
}
