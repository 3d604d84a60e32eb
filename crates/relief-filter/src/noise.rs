//! Shared construction of zero-mean Gaussian noise sources.

use rand_distr::Normal;
use relief_core::NoiseError;

/// Build `Normal(0, sigma)`, rejecting negative or non-finite scales.
///
/// A zero scale is accepted and yields a distribution that always
/// samples `0.0`, which turns the owning stage deterministic.
pub(crate) fn zero_mean(name: &'static str, sigma: f64) -> Result<Normal<f64>, NoiseError> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(NoiseError { name, value: sigma });
    }
    Normal::new(0.0, sigma).map_err(|_| NoiseError { name, value: sigma })
}
