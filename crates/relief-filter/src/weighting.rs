//! Importance weighting of particles against a sensor reading.
//!
//! For each particle the absolute error between the observed reading and
//! the exact field value under the particle is computed. Weights are then
//!
//! ```text
//! w_i = (max_j(error_j) - error_i) ^ 3
//! ```
//!
//! with `w_i` forced to zero for particles sitting exactly on the clipping
//! boundary. The worst particle weighs zero and a perfect match weighs
//! the most.

use relief_core::FieldError;
use relief_field::ScalarField;

use crate::particles::ParticleSet;
use crate::sensor::SensorModel;

/// Power applied to the error margin to sharpen the weight distribution.
pub const SHARPENING_EXPONENT: i32 = 3;

/// Turn per-particle errors into non-negative weights.
///
/// `on_border[i]` marks particles whose weight must be zero regardless of
/// error. Both slices must have the same length. The result is pointwise
/// non-negative for any finite input.
pub fn weights_from_errors(errors: &[f64], on_border: &[bool]) -> Vec<f64> {
    debug_assert_eq!(errors.len(), on_border.len());
    let max_error = errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    errors
        .iter()
        .zip(on_border)
        .map(|(&error, &border)| {
            if border {
                0.0
            } else {
                (max_error - error).max(0.0).powi(SHARPENING_EXPONENT)
            }
        })
        .collect()
}

/// Score every particle against `observed` and store the weights in the set.
///
/// Particle expectations are exact (noise-free) reads.
///
/// # Errors
///
/// Returns [`FieldError::OutOfBounds`] if any particle lies off the field.
/// This cannot happen directly after [`ParticleSet::move_all`], which clips.
pub fn compute_weights(
    particles: &mut ParticleSet,
    field: &ScalarField,
    sensor: &SensorModel,
    observed: f64,
) -> Result<(), FieldError> {
    let mut errors = Vec::with_capacity(particles.len());
    let mut on_border = Vec::with_capacity(particles.len());
    for pose in particles.poses() {
        let expected = sensor.read_exact(field, pose)?;
        errors.push((observed - expected).abs());
        on_border.push(field.is_on_border(pose.x, pose.y));
    }
    let weights = weights_from_errors(&errors, &on_border);
    particles.weights_mut().copy_from_slice(&weights);
    Ok(())
}
