//! Localizer configuration, validation, and error types.
//!
//! [`LocalizerConfig`] is the builder-input for a [`Localizer`](crate::Localizer).
//! [`validate()`](LocalizerConfig::validate) checks every invariant against
//! the field the localizer will run on, so a bad configuration fails at
//! construction rather than part-way through a step.

use std::error::Error;
use std::fmt;

use relief_core::{FieldError, NoiseError, Pose};
use relief_field::ScalarField;
use relief_filter::{MotionModel, Roughener, SensorModel};

// ── MeasurementPolicy ──────────────────────────────────────────────

/// When the measurement half of the pipeline (sense, weight, resample,
/// jitter) runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeasurementPolicy {
    /// Only on steps whose control has a non-zero forward component.
    /// Pure turns move the agent and the particles but take no reading.
    #[default]
    OnForwardMotion,
    /// On every step.
    EveryStep,
}

impl MeasurementPolicy {
    /// Whether a step with a forward command of `forward` takes a reading.
    pub fn measures(self, forward: f64) -> bool {
        match self {
            Self::OnForwardMotion => forward != 0.0,
            Self::EveryStep => true,
        }
    }
}

// ── MotionNoise ────────────────────────────────────────────────────

/// Noise applied to the true agent's commanded motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionNoise {
    /// Standard deviation of the forward distance, in cells. Default: 0.5.
    pub sigma_step: f64,
    /// Standard deviation of the turn, in radians. Default: 5°.
    pub sigma_turn: f64,
}

impl Default for MotionNoise {
    fn default() -> Self {
        Self {
            sigma_step: 0.5,
            sigma_turn: 5f64.to_radians(),
        }
    }
}

// ── RougheningNoise ────────────────────────────────────────────────

/// Jitter applied to every particle after resampling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RougheningNoise {
    /// Standard deviation of the x and y jitter, in cells. Default: 2.
    pub sigma_pos: f64,
    /// Standard deviation of the heading jitter, in radians. Default: 10°.
    pub sigma_turn: f64,
}

impl Default for RougheningNoise {
    fn default() -> Self {
        Self {
            sigma_pos: 2.0,
            sigma_turn: 10f64.to_radians(),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`LocalizerConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `particle_count` is zero.
    ZeroParticles,
    /// A noise scale is negative or not finite.
    Noise(NoiseError),
    /// The field could not be built (zero dimensions, bad buffer).
    Field(FieldError),
    /// The configured initial pose has a non-finite component.
    NonFiniteInitialPose {
        /// The rejected pose.
        pose: Pose,
    },
    /// The configured initial pose lies outside the field.
    InitialPoseOffField {
        /// The rejected pose.
        pose: Pose,
        /// Field width in cells.
        width: u32,
        /// Field height in cells.
        height: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroParticles => write!(f, "particle_count must be at least 1"),
            Self::Noise(e) => write!(f, "noise: {e}"),
            Self::Field(e) => write!(f, "field: {e}"),
            Self::NonFiniteInitialPose { pose } => {
                write!(f, "initial pose {pose} is not finite")
            }
            Self::InitialPoseOffField {
                pose,
                width,
                height,
            } => write!(f, "initial pose {pose} lies outside the {width}x{height} field"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Noise(e) => Some(e),
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NoiseError> for ConfigError {
    fn from(e: NoiseError) -> Self {
        Self::Noise(e)
    }
}

impl From<FieldError> for ConfigError {
    fn from(e: FieldError) -> Self {
        Self::Field(e)
    }
}

// ── LocalizerConfig ────────────────────────────────────────────────

/// Complete configuration for constructing a [`Localizer`](crate::Localizer).
///
/// The [`Default`] reproduces the reference tuning: 3000 particles,
/// motion noise 0.5 cells / 5°, sensor noise 2, roughening 2 cells / 10°,
/// measurement on forward motion only, seed 0.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalizerConfig {
    /// Number of particles N. Fixed for the lifetime of the localizer.
    pub particle_count: usize,
    /// Noise on the true agent's motion.
    pub motion: MotionNoise,
    /// Standard deviation of the true agent's sensor reading.
    pub sensor_sigma: f64,
    /// Post-resampling jitter.
    pub roughening: RougheningNoise,
    /// Seed for the localizer's generator.
    pub seed: u64,
    /// Starting pose of the true agent. `None` places it at
    /// `(W/4, H/4, 0)`.
    pub initial_pose: Option<Pose>,
    /// When the measurement half of a step runs.
    pub measurement: MeasurementPolicy,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            particle_count: 3000,
            motion: MotionNoise::default(),
            sensor_sigma: 2.0,
            roughening: RougheningNoise::default(),
            seed: 0,
            initial_pose: None,
            measurement: MeasurementPolicy::default(),
        }
    }
}

impl LocalizerConfig {
    /// Validate every invariant against `field`.
    pub fn validate(&self, field: &ScalarField) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::ZeroParticles);
        }
        self.models()?;
        let pose = self.initial_pose_on(field);
        if !pose.is_finite() {
            return Err(ConfigError::NonFiniteInitialPose { pose });
        }
        if !field.contains(pose.x, pose.y) {
            return Err(ConfigError::InitialPoseOffField {
                pose,
                width: field.width(),
                height: field.height(),
            });
        }
        Ok(())
    }

    /// The true agent's starting pose on `field`.
    pub fn initial_pose_on(&self, field: &ScalarField) -> Pose {
        self.initial_pose.unwrap_or_else(|| {
            Pose::new(
                f64::from(field.width()) / 4.0,
                f64::from(field.height()) / 4.0,
                0.0,
            )
        })
    }

    /// Build the three noise models this configuration describes.
    pub(crate) fn models(&self) -> Result<(MotionModel, SensorModel, Roughener), NoiseError> {
        Ok((
            MotionModel::new(self.motion.sigma_step, self.motion.sigma_turn)?,
            SensorModel::new(self.sensor_sigma)?,
            Roughener::new(self.roughening.sigma_pos, self.roughening.sigma_turn)?,
        ))
    }
}
