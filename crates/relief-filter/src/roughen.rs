//! Post-resampling jitter (roughening).
//!
//! Resampling duplicates the fittest particles, so after a few steps the
//! population would otherwise collapse onto a handful of identical poses.
//! Adding small independent Gaussian noise to every coordinate keeps the
//! hypotheses distinct.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use relief_core::NoiseError;

use crate::noise::zero_mean;
use crate::particles::ParticleSet;

/// Adds `N(0, sigma_pos)` to `x` and `y` and `N(0, sigma_turn)` to `theta`
/// of every particle.
///
/// Positions are not re-clipped; a particle may sit slightly off the field
/// until the next motion update clips it.
#[derive(Clone, Debug)]
pub struct Roughener {
    sigma_pos: f64,
    sigma_turn: f64,
    pos_noise: Normal<f64>,
    turn_noise: Normal<f64>,
}

impl Roughener {
    /// Create a roughener with position (cells) and heading (radians) scales.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError`] if either scale is negative or not finite.
    pub fn new(sigma_pos: f64, sigma_turn: f64) -> Result<Self, NoiseError> {
        Ok(Self {
            sigma_pos,
            sigma_turn,
            pos_noise: zero_mean("sigma_pos", sigma_pos)?,
            turn_noise: zero_mean("sigma_turn_particle", sigma_turn)?,
        })
    }

    /// Position jitter scale.
    pub fn sigma_pos(&self) -> f64 {
        self.sigma_pos
    }

    /// Heading jitter scale.
    pub fn sigma_turn(&self) -> f64 {
        self.sigma_turn
    }

    /// Jitter every particle in place.
    pub fn jitter<R: Rng + ?Sized>(&self, particles: &mut ParticleSet, rng: &mut R) {
        for pose in particles.poses_mut() {
            pose.x += self.pos_noise.sample(rng);
            pose.y += self.pos_noise.sample(rng);
            pose.theta += self.turn_noise.sample(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use relief_core::Pose;

    #[test]
    fn zero_scale_is_identity() {
        let r = Roughener::new(0.0, 0.0).unwrap();
        let poses = vec![Pose::new(1.0, 2.0, 3.0), Pose::new(4.0, 5.0, 6.0)];
        let mut set = ParticleSet::from_poses(poses.clone());
        r.jitter(&mut set, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(set.poses(), poses.as_slice());
    }

    #[test]
    fn jitter_separates_duplicates_and_keeps_length() {
        let r = Roughener::new(2.0, 10f64.to_radians()).unwrap();
        let mut set = ParticleSet::from_poses(vec![Pose::new(50.0, 50.0, 0.0); 500]);
        r.jitter(&mut set, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(set.len(), 500);
        let (sx, sy) = set.spread();
        assert!((sx - 2.0).abs() < 0.3, "x spread {sx}");
        assert!((sy - 2.0).abs() < 0.3, "y spread {sy}");
        let distinct = set
            .poses()
            .windows(2)
            .filter(|w| w[0] != w[1])
            .count();
        assert_eq!(distinct, 499);
    }

    #[test]
    fn jitter_does_not_clip() {
        let r = Roughener::new(5.0, 0.0).unwrap();
        let mut set = ParticleSet::from_poses(vec![Pose::new(0.0, 0.0, 0.0); 200]);
        r.jitter(&mut set, &mut ChaCha8Rng::seed_from_u64(2));
        assert!(set.poses().iter().any(|p| p.x < 0.0));
        assert!(set.poses().iter().any(|p| p.y < 0.0));
    }

    #[test]
    fn rejects_bad_scales() {
        assert_eq!(
            Roughener::new(1.0, -1.0).unwrap_err().name,
            "sigma_turn_particle"
        );
    }
}
