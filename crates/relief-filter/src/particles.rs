//! The particle population: N pose hypotheses with importance weights.
//!
//! The population size is fixed at construction. Every operation in this
//! crate preserves `len()`; resampling replaces poses in place rather
//! than growing or shrinking the set.

use std::f64::consts::TAU;

use rand::Rng;
use relief_core::{Control, Pose, ResampleError};
use relief_field::ScalarField;

/// N candidate poses and their importance weights.
///
/// Index identity carries no meaning across resampling: the particle at
/// index `i` after a resample is unrelated to the one at `i` before.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSet {
    poses: Vec<Pose>,
    weights: Vec<f64>,
}

impl ParticleSet {
    /// Scatter `count` particles uniformly over the whole field.
    ///
    /// `x` is drawn from `[0, width)`, `y` from `[0, height)` and the
    /// heading from `[0, 2π)`. All weights start at `1.0`.
    pub fn uniform<R: Rng + ?Sized>(count: usize, field: &ScalarField, rng: &mut R) -> Self {
        let width = f64::from(field.width());
        let height = f64::from(field.height());
        let poses = (0..count)
            .map(|_| {
                let x = rng.random::<f64>() * width;
                let y = rng.random::<f64>() * height;
                let theta = rng.random::<f64>() * TAU;
                Pose::new(x, y, theta)
            })
            .collect();
        Self::from_poses(poses)
    }

    /// Wrap explicit poses, with every weight set to `1.0`.
    pub fn from_poses(poses: Vec<Pose>) -> Self {
        let weights = vec![1.0; poses.len()];
        Self { poses, weights }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Whether the set holds no particles.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Particle poses, in index order.
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Importance weights, parallel to [`poses`](Self::poses).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterate `(pose, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Pose, f64)> + '_ {
        self.poses.iter().zip(self.weights.iter().copied())
    }

    /// Replace all weights.
    ///
    /// # Errors
    ///
    /// - [`ResampleError::LengthMismatch`] if `weights` has the wrong length.
    /// - [`ResampleError::InvalidWeight`] if any weight is negative or not finite.
    pub fn set_weights(&mut self, weights: Vec<f64>) -> Result<(), ResampleError> {
        if weights.len() != self.poses.len() {
            return Err(ResampleError::LengthMismatch {
                particles: self.poses.len(),
                weights: weights.len(),
            });
        }
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(ResampleError::InvalidWeight { index, value });
        }
        self.weights = weights;
        Ok(())
    }

    /// Apply the same noise-free control to every particle, then clip
    /// positions onto the field.
    ///
    /// Population noise is reintroduced later by the roughening stage;
    /// adding it here as well would count that variance twice.
    pub fn move_all(&mut self, control: Control, field: &ScalarField) {
        for pose in &mut self.poses {
            *pose = pose.advanced(control.forward, control.turn);
        }
        self.clip_to(field);
    }

    /// Clamp every position into `[0, width-1] × [0, height-1]`.
    ///
    /// Headings are left untouched.
    pub fn clip_to(&mut self, field: &ScalarField) {
        for pose in &mut self.poses {
            let (x, y) = field.clamp_position(pose.x, pose.y);
            pose.x = x;
            pose.y = y;
        }
    }

    /// Replace the poses with those at `indices` and reset all weights to `1.0`.
    ///
    /// `indices.len()` must equal `len()`; callers in this crate guarantee it.
    pub(crate) fn gather(&mut self, indices: &[usize]) {
        debug_assert_eq!(indices.len(), self.poses.len());
        let drawn: Vec<Pose> = indices.iter().map(|&i| self.poses[i]).collect();
        self.poses = drawn;
        self.weights.iter_mut().for_each(|w| *w = 1.0);
    }

    pub(crate) fn poses_mut(&mut self) -> &mut [Pose] {
        &mut self.poses
    }

    pub(crate) fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    /// Best-guess pose: mean position with a circular-mean heading.
    ///
    /// Returns `None` for an empty set. Weights are ignored; after
    /// resampling the population density already encodes them.
    pub fn estimate(&self) -> Option<Pose> {
        if self.poses.is_empty() {
            return None;
        }
        let n = self.poses.len() as f64;
        let (mut sx, mut sy, mut ss, mut sc) = (0.0, 0.0, 0.0, 0.0);
        for p in &self.poses {
            sx += p.x;
            sy += p.y;
            let (sin, cos) = p.theta.sin_cos();
            ss += sin;
            sc += cos;
        }
        Some(Pose::new(sx / n, sy / n, ss.atan2(sc)))
    }

    /// Population standard deviation of the `x` and `y` coordinates.
    ///
    /// Useful as a convergence diagnostic: a collapsing population shows a
    /// shrinking spread.
    pub fn spread(&self) -> (f64, f64) {
        let Some(mean) = self.estimate() else {
            return (0.0, 0.0);
        };
        let n = self.poses.len() as f64;
        let (vx, vy) = self.poses.iter().fold((0.0, 0.0), |(vx, vy), p| {
            (vx + (p.x - mean.x).powi(2), vy + (p.y - mean.y).powi(2))
        });
        ((vx / n).sqrt(), (vy / n).sqrt())
    }
}
