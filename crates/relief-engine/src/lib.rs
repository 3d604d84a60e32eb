//! Simulation engine for Relief localization.
//!
//! [`Localizer`] owns the [`SimulationState`] (field, true pose, particle
//! set) together with the noise models and a seeded generator, and runs
//! one full pipeline pass per [`step()`](Localizer::step):
//!
//! ```text
//! motion (true pose) → motion (particles, clip) → sense → weight → resample → jitter
//! ```
//!
//! The [`driver`] module defines the seams to the outside world (command
//! input and frame presentation) and a loop that runs until halted.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod localizer;
pub mod metrics;
pub mod state;
pub mod teleop;

pub use config::{ConfigError, LocalizerConfig, MeasurementPolicy, MotionNoise, RougheningNoise};
pub use driver::{run_until_halt, CommandSource, Frame, FrameSink, NullSink, RunSummary};
pub use localizer::{Localizer, StepReport};
pub use metrics::StepMetrics;
pub use state::SimulationState;
pub use teleop::{Key, Teleop, TeleopConfig};
