//! Physics world configuration.

use glam::Vec3;

/// Reasons a [`PhysicsConfig`] cannot drive a stable simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("gravity must be finite, got {0}")]
    NonFiniteGravity(Vec3),
    #[error("fixed timestep must be a positive finite number of seconds, got {0}")]
    InvalidTimestep(f64),
    #[error("max_substeps must be at least 1")]
    ZeroSubsteps,
    #[error("solver_iterations must be at least 1")]
    ZeroSolverIterations,
}

/// Configuration for the physics simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity vector. Default: (0, -9.81, 0).
    pub gravity: Vec3,
    /// Fixed timestep for physics updates in seconds. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of sub-steps per frame. Default: 4.
    pub max_substeps: u32,
    /// Number of collision resolution passes per step. Default: 4.
    pub solver_iterations: u32,
    /// Not consulted by the step. Default: true.
    pub enable_sleeping: bool,
    /// Not consulted by the step. Default: 0.005.
    pub sleep_threshold: f32,
    /// Continuous collision detection is not implemented. Default: false.
    pub enable_ccd: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
            solver_iterations: 4,
            enable_sleeping: true,
            sleep_threshold: 0.005,
            enable_ccd: false,
        }
    }
}

impl PhysicsConfig {
    /// Check the fields the step loop divides by or iterates on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFiniteGravity(self.gravity));
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(ConfigError::InvalidTimestep(self.fixed_timestep));
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::ZeroSubsteps);
        }
        if self.solver_iterations == 0 {
            return Err(ConfigError::ZeroSolverIterations);
        }
        Ok(())
    }
}
