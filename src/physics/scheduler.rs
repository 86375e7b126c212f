//! Fixed timestep accumulator.

/// Slack absorbing floating point error when a frame is an exact multiple of the step.
const ACCUMULATOR_EPSILON: f64 = 1e-9;

/// Accumulates variable frame time and releases it in fixed-size steps.
///
/// Time left over after hitting the sub-step cap is kept, so sustained slow
/// frames make the simulation fall behind real time instead of piling up
/// unbounded work in a single frame.
#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Residual time not yet consumed by a fixed step.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Add `frame_delta` and call `step` once per whole `fixed_timestep`
    /// available, at most `max_substeps` times. Returns the number of steps run.
    pub fn advance<F: FnMut()>(
        &mut self,
        frame_delta: f64,
        fixed_timestep: f64,
        max_substeps: u32,
        mut step: F,
    ) -> u32 {
        self.accumulator += frame_delta;

        let mut substeps = 0u32;
        while self.accumulator + ACCUMULATOR_EPSILON >= fixed_timestep && substeps < max_substeps
        {
            step();
            self.accumulator -= fixed_timestep;
            substeps += 1;
        }

        if substeps == max_substeps && self.accumulator >= fixed_timestep {
            tracing::debug!(
                substeps,
                residual = self.accumulator,
                "physics sub-step cap reached, carrying time over"
            );
        }

        substeps
    }
}
