//! Point sensor that reads the scalar field beneath a pose.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use relief_core::{FieldError, NoiseError, Pose};
use relief_field::ScalarField;

use crate::noise::zero_mean;

/// Reads the field value at a pose's (truncated) cell.
///
/// The true agent senses with Gaussian measurement noise; particle
/// expectations are read exactly, so that a particle's error reflects only
/// its mismatch with the map and not a second helping of sensor noise.
#[derive(Clone, Debug)]
pub struct SensorModel {
    sigma: f64,
    noise: Normal<f64>,
}

impl SensorModel {
    /// Create a sensor with measurement standard deviation `sigma`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError`] if `sigma` is negative or not finite.
    pub fn new(sigma: f64) -> Result<Self, NoiseError> {
        Ok(Self {
            sigma,
            noise: zero_mean("sigma_sensor", sigma)?,
        })
    }

    /// Measurement standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Exact field value under `pose`.
    pub fn read_exact(&self, field: &ScalarField, pose: &Pose) -> Result<f64, FieldError> {
        field.sample(pose.x, pose.y).map(f64::from)
    }

    /// Field value under `pose` plus `N(0, sigma)` noise.
    pub fn read_noisy<R: Rng + ?Sized>(
        &self,
        field: &ScalarField,
        pose: &Pose,
        rng: &mut R,
    ) -> Result<f64, FieldError> {
        Ok(self.read_exact(field, pose)? + self.noise.sample(rng))
    }

    /// Dispatch to [`read_noisy`](Self::read_noisy) or
    /// [`read_exact`](Self::read_exact). The generator is untouched when
    /// `noisy` is false.
    pub fn read<R: Rng + ?Sized>(
        &self,
        field: &ScalarField,
        pose: &Pose,
        noisy: bool,
        rng: &mut R,
    ) -> Result<f64, FieldError> {
        if noisy {
            self.read_noisy(field, pose, rng)
        } else {
            self.read_exact(field, pose)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn field() -> ScalarField {
        ScalarField::from_fn(4, 4, |col, row| (row * 4 + col) as f32 * 10.0).unwrap()
    }

    #[test]
    fn exact_read_truncates_position() {
        let s = SensorModel::new(2.0).unwrap();
        let f = field();
        assert_eq!(s.read_exact(&f, &Pose::new(2.7, 1.2, 9.0)).unwrap(), 60.0);
    }

    #[test]
    fn exact_read_leaves_rng_untouched() {
        let s = SensorModel::new(2.0).unwrap();
        let f = field();
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let b = a.clone();
        s.read(&f, &Pose::new(1.0, 1.0, 0.0), false, &mut a).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_field_read_fails() {
        let s = SensorModel::new(2.0).unwrap();
        let f = field();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(matches!(
            s.read(&f, &Pose::new(4.0, 0.0, 0.0), true, &mut rng),
            Err(FieldError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn noisy_reads_scatter_around_truth() {
        let s = SensorModel::new(2.0).unwrap();
        let f = field();
        let pose = Pose::new(3.0, 3.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let n = 10_000;
        let reads: Vec<f64> = (0..n)
            .map(|_| s.read_noisy(&f, &pose, &mut rng).unwrap())
            .collect();
        let mean = reads.iter().sum::<f64>() / n as f64;
        let var = reads.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 150.0).abs() < 0.1, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "std {}", var.sqrt());
    }

    #[test]
    fn zero_sigma_noisy_equals_exact() {
        let s = SensorModel::new(0.0).unwrap();
        let f = field();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pose = Pose::new(1.5, 2.5, 0.0);
        assert_eq!(
            s.read_noisy(&f, &pose, &mut rng).unwrap(),
            s.read_exact(&f, &pose).unwrap()
        );
    }
}
