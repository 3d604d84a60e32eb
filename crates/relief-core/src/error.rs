//! Error types shared across the Relief workspace.
//!
//! Organized by subsystem: field access, noise-model construction,
//! resampling, and the per-step pipeline that wraps the other two.
//! Configuration errors live with the configuration in `relief-engine`.

use std::error::Error;
use std::fmt;

/// Errors from scalar-field construction or lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// A sample was requested outside `[0, width) × [0, height)` after
    /// truncation to an integer cell.
    OutOfBounds {
        /// Requested column coordinate (before truncation).
        x: f64,
        /// Requested row coordinate (before truncation).
        y: f64,
        /// Field width in cells.
        width: u32,
        /// Field height in cells.
        height: u32,
    },
    /// A field was constructed with a zero dimension.
    EmptyField {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The sample buffer does not hold exactly `width * height` values.
    DataLengthMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A sample value is NaN or infinite.
    NonFiniteSample {
        /// Row-major index of the offending sample.
        index: usize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "position ({x}, {y}) is outside the {width}x{height} field"
            ),
            Self::EmptyField { width, height } => {
                write!(f, "field dimensions must be positive, got {width}x{height}")
            }
            Self::DataLengthMismatch { expected, actual } => {
                write!(f, "field data has {actual} samples, expected {expected}")
            }
            Self::NonFiniteSample { index } => {
                write!(f, "field sample at index {index} is not finite")
            }
        }
    }
}

impl Error for FieldError {}

/// A noise scale that cannot parameterize a Gaussian.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseError {
    /// Name of the offending parameter (e.g. `"sigma_step"`).
    pub name: &'static str,
    /// The rejected value.
    pub value: f64,
}

impl fmt::Display for NoiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "noise scale {} must be finite and >= 0, got {}",
            self.name, self.value
        )
    }
}

impl Error for NoiseError {}

/// Errors from drawing a new particle generation.
///
/// An all-zero weight vector is *not* an error: it is handled by the
/// resampler's uniform fallback and reported as a degenerate outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum ResampleError {
    /// The particle set is empty.
    EmptySet,
    /// The weight vector does not have one entry per particle.
    LengthMismatch {
        /// Number of particles.
        particles: usize,
        /// Number of weights.
        weights: usize,
    },
    /// A weight is negative, NaN, or infinite.
    InvalidWeight {
        /// Index of the offending weight.
        index: usize,
        /// The rejected value.
        value: f64,
    },
    /// The weights are individually valid but their sum is not finite.
    WeightOverflow,
}

impl fmt::Display for ResampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySet => write!(f, "cannot resample an empty particle set"),
            Self::LengthMismatch { particles, weights } => write!(
                f,
                "weight count {weights} does not match particle count {particles}"
            ),
            Self::InvalidWeight { index, value } => {
                write!(f, "weight {index} must be finite and >= 0, got {value}")
            }
            Self::WeightOverflow => write!(f, "sum of weights overflows"),
        }
    }
}

impl Error for ResampleError {}

/// Errors that abort a simulation step.
///
/// Every variant is fatal to the run; the step is not retried.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// A sensor read addressed a position outside the field.
    Field(FieldError),
    /// Resampling rejected the weight vector.
    Resample(ResampleError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(e) => write!(f, "field access failed: {e}"),
            Self::Resample(e) => write!(f, "resampling failed: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            Self::Resample(e) => Some(e),
        }
    }
}

impl From<FieldError> for StepError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

impl From<ResampleError> for StepError {
    fn from(e: ResampleError) -> Self {
        Self::Resample(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_position_and_extent() {
        let e = FieldError::OutOfBounds {
            x: -1.5,
            y: 3.0,
            width: 4,
            height: 5,
        };
        let msg = e.to_string();
        assert!(msg.contains("-1.5"), "{msg}");
        assert!(msg.contains("4x5"), "{msg}");
    }

    #[test]
    fn step_error_chains_source() {
        let inner = ResampleError::EmptySet;
        let e = StepError::from(inner.clone());
        let src = e.source().expect("source");
        assert_eq!(src.to_string(), inner.to_string());
    }

    #[test]
    fn noise_error_display() {
        let e = NoiseError {
            name: "sigma_step",
            value: -0.5,
        };
        assert_eq!(
            e.to_string(),
            "noise scale sigma_step must be finite and >= 0, got -0.5"
        );
    }
}
