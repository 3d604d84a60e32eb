//! Multinomial resampling.
//!
//! Draws N indices independently, with replacement, with probability
//! `w_i / Σw`, and rebuilds the population from the poses at those
//! indices. Weights belong to the previous generation and are reset.
//!
//! When every weight is zero (every particle boundary-penalized, or all
//! errors tied at the maximum) the normalization is undefined. Instead of
//! dividing by zero the draw falls back to uniform over all indices and
//! the outcome is reported as [`ResampleOutcome::Degenerate`].

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use relief_core::ResampleError;

use crate::particles::ParticleSet;

/// How a generation was drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResampleOutcome {
    /// Indices were drawn in proportion to weight.
    Weighted,
    /// All weights were zero; indices were drawn uniformly.
    Degenerate,
}

/// Draw `count` indices into `weights`, proportional to weight.
///
/// # Errors
///
/// - [`ResampleError::EmptySet`] if `weights` is empty.
/// - [`ResampleError::InvalidWeight`] for a negative or non-finite weight.
/// - [`ResampleError::WeightOverflow`] if the weights sum to infinity.
pub fn draw_indices<R: Rng + ?Sized>(
    weights: &[f64],
    count: usize,
    rng: &mut R,
) -> Result<(Vec<usize>, ResampleOutcome), ResampleError> {
    if weights.is_empty() {
        return Err(ResampleError::EmptySet);
    }
    if let Some((index, &value)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(ResampleError::InvalidWeight { index, value });
    }

    let total: f64 = weights.iter().sum();
    if !total.is_finite() {
        return Err(ResampleError::WeightOverflow);
    }
    if total == 0.0 {
        let n = weights.len();
        let indices = (0..count).map(|_| rng.random_range(0..n)).collect();
        return Ok((indices, ResampleOutcome::Degenerate));
    }

    let dist = WeightedIndex::new(weights).map_err(|_| ResampleError::WeightOverflow)?;
    let indices = (0..count).map(|_| dist.sample(rng)).collect();
    Ok((indices, ResampleOutcome::Weighted))
}

/// Replace the population with a weight-proportional redraw of itself.
///
/// The set keeps its length; all weights are reset to `1.0`.
pub fn resample<R: Rng + ?Sized>(
    particles: &mut ParticleSet,
    rng: &mut R,
) -> Result<ResampleOutcome, ResampleError> {
    let (indices, outcome) = draw_indices(particles.weights(), particles.len(), rng)?;
    if outcome == ResampleOutcome::Degenerate {
        log::warn!(
            "all {} particle weights are zero; resampling uniformly",
            particles.len()
        );
    }
    particles.gather(&indices);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use relief_core::Pose;

    fn line(n: usize) -> ParticleSet {
        ParticleSet::from_poses((0..n).map(|i| Pose::new(i as f64, 0.0, 0.0)).collect())
    }

    #[test]
    fn single_nonzero_weight_collapses_onto_it() {
        let mut set = line(50);
        let mut weights = vec![0.0; 50];
        weights[17] = 3.5;
        set.set_weights(weights).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = resample(&mut set, &mut rng).unwrap();
        assert_eq!(outcome, ResampleOutcome::Weighted);
        assert_eq!(set.len(), 50);
        assert!(set.poses().iter().all(|p| *p == Pose::new(17.0, 0.0, 0.0)));
    }

    #[test]
    fn all_zero_weights_fall_back_to_uniform() {
        let mut set = line(20);
        set.set_weights(vec![0.0; 20]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let outcome = resample(&mut set, &mut rng).unwrap();
        assert_eq!(outcome, ResampleOutcome::Degenerate);
        assert_eq!(set.len(), 20);
        for p in set.poses() {
            assert!(p.is_finite());
            assert!((0.0..20.0).contains(&p.x));
        }
        assert!(set.weights().iter().all(|&w| w == 1.0));
    }

    #[test]
    fn rejects_invalid_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            draw_indices(&[], 4, &mut rng).unwrap_err(),
            ResampleError::EmptySet
        );
        assert!(matches!(
            draw_indices(&[1.0, f64::NAN], 2, &mut rng),
            Err(ResampleError::InvalidWeight { index: 1, .. })
        ));
        assert!(matches!(
            draw_indices(&[-1.0, 2.0], 2, &mut rng),
            Err(ResampleError::InvalidWeight { index: 0, .. })
        ));
        assert_eq!(
            draw_indices(&[f64::MAX, f64::MAX], 2, &mut rng).unwrap_err(),
            ResampleError::WeightOverflow
        );
    }

    #[test]
    fn heavier_particles_are_drawn_more_often() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (indices, _) = draw_indices(&[1.0, 3.0], 40_000, &mut rng).unwrap();
        let ones = indices.iter().filter(|&&i| i == 1).count() as f64;
        let frac = ones / indices.len() as f64;
        assert!((frac - 0.75).abs() < 0.01, "fraction {frac}");
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let weights = [0.5, 0.0, 2.0, 1.0, 0.25];
        let a = draw_indices(&weights, 100, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = draw_indices(&weights, 100, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
        assert!(!a.0.contains(&1), "zero-weight index must never be drawn");
    }
}
