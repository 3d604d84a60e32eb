//! Noisy motion model for the tracked (true) agent.
//!
//! The commanded forward distance and turn are each perturbed with an
//! independent Gaussian before being applied:
//!
//! ```text
//! forward' ~ N(forward, sigma_step)
//! turn'    ~ N(turn, sigma_turn)
//! x += forward' * cos(theta);  y += forward' * sin(theta);  theta += turn'
//! ```
//!
//! No clipping is applied; the true pose may leave the field, in which
//! case the next sensor read reports `OutOfBounds`.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use relief_core::{Control, NoiseError, Pose};

use crate::noise::zero_mean;

/// Gaussian process noise applied to the true agent's motion.
///
/// These scales are deliberately separate from the [`Roughener`](crate::Roughener)
/// pair: the agent's actuation error and the population's diversity
/// injection are configured independently.
#[derive(Clone, Debug)]
pub struct MotionModel {
    sigma_step: f64,
    sigma_turn: f64,
    step_noise: Normal<f64>,
    turn_noise: Normal<f64>,
}

impl MotionModel {
    /// Create a motion model with the given step (cells) and turn
    /// (radians) standard deviations.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError`] if either scale is negative or not finite.
    pub fn new(sigma_step: f64, sigma_turn: f64) -> Result<Self, NoiseError> {
        Ok(Self {
            sigma_step,
            sigma_turn,
            step_noise: zero_mean("sigma_step", sigma_step)?,
            turn_noise: zero_mean("sigma_turn", sigma_turn)?,
        })
    }

    /// Standard deviation of the forward distance, in cells.
    pub fn sigma_step(&self) -> f64 {
        self.sigma_step
    }

    /// Standard deviation of the turn, in radians.
    pub fn sigma_turn(&self) -> f64 {
        self.sigma_turn
    }

    /// Apply `control` to `pose` with freshly drawn noise.
    ///
    /// Draws the forward perturbation first, then the turn perturbation.
    pub fn advance<R: Rng + ?Sized>(&self, pose: Pose, control: Control, rng: &mut R) -> Pose {
        let forward = control.forward + self.step_noise.sample(rng);
        let turn = control.turn + self.turn_noise.sample(rng);
        pose.advanced(forward, turn)
    }
}
