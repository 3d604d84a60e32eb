//! Relief: Monte Carlo localization of a mobile agent over a known scalar field.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Relief sub-crates. For most users, adding `relief` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use relief::prelude::*;
//!
//! // A 64x64 map with enough texture to localize against.
//! let field = ScalarField::from_fn(64, 64, |col, row| ((col * 5 + row * 11) % 256) as f32).unwrap();
//! let config = LocalizerConfig {
//!     particle_count: 500,
//!     seed: 42,
//!     ..Default::default()
//! };
//! let mut localizer = Localizer::new(config, field).unwrap();
//!
//! // Drive forward three times, then stop.
//! let keys = [Key::Forward, Key::Forward, Key::Forward, Key::Other];
//! let mut source = Teleop::new(keys.into_iter(), TeleopConfig::default());
//! let summary = run_until_halt(&mut localizer, &mut source, &mut NullSink).unwrap();
//! assert_eq!(summary.steps, 3);
//! assert_eq!(localizer.state().particles().len(), 500);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `relief-core` | `Pose`, `Control`, `Command`, error types |
//! | [`field`] | `relief-field` | The `ScalarField` map |
//! | [`filter`] | `relief-filter` | Motion, sensor, weighting, resampling, roughening |
//! | [`engine`] | `relief-engine` | `Localizer`, configuration, driver loop, teleop |
//! | [`replay`] | `relief-replay` | Deterministic replay recording and verification |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value and error types (`relief-core`).
pub use relief_core as types;

/// The known map (`relief-field`).
///
/// [`field::ScalarField`] is an immutable row-major grid with truncating
/// point lookup.
pub use relief_field as field;

/// Particle filter stages (`relief-filter`).
///
/// Each stage is usable on its own: [`filter::MotionModel`],
/// [`filter::SensorModel`], [`filter::compute_weights`],
/// [`filter::resample`] and [`filter::Roughener`].
pub use relief_filter as filter;

/// The step pipeline and its seams (`relief-engine`).
pub use relief_engine as engine;

/// Deterministic replay recording and verification (`relief-replay`).
///
/// Record runs with [`replay::ReplayWriter`], verify them with
/// [`replay::replay_localizer`].
pub use relief_replay as replay;

/// Common imports for typical Relief usage.
///
/// ```rust
/// use relief::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use relief_core::{Command, Control, Pose};

    // Errors
    pub use relief_core::{FieldError, NoiseError, ResampleError, StepError};

    // Field
    pub use relief_field::ScalarField;

    // Filter
    pub use relief_filter::{ParticleSet, ResampleOutcome};

    // Engine
    pub use relief_engine::{
        run_until_halt, CommandSource, ConfigError, Frame, FrameSink, Key, Localizer,
        LocalizerConfig, MeasurementPolicy, NullSink, RunSummary, StepMetrics, StepReport, Teleop,
        TeleopConfig,
    };
}
