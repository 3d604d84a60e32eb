//! Particle filter stages for Monte Carlo localization over a scalar field.
//!
//! Each module is one stage of the per-step pipeline, listed here in
//! execution order:
//!
//! 1. [`motion`]: advance the true pose with Gaussian process noise.
//! 2. [`particles`]: mirror the same control on every particle, noise-free,
//!    then clip positions onto the field.
//! 3. [`sensor`]: read the field under the true pose (noisy) or under a
//!    particle (exact).
//! 4. [`weighting`]: score particles against the reading.
//! 5. [`resample`]: redraw the population in proportion to weight.
//! 6. [`roughen`]: jitter the redrawn population.
//!
//! Every stochastic stage takes its randomness as an explicit
//! `&mut impl Rng`, so a seeded generator replays a run bit-for-bit.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod motion;
mod noise;
pub mod particles;
pub mod resample;
pub mod roughen;
pub mod sensor;
pub mod weighting;

pub use motion::MotionModel;
pub use particles::ParticleSet;
pub use resample::{draw_indices, resample, ResampleOutcome};
pub use roughen::Roughener;
pub use sensor::SensorModel;
pub use weighting::{compute_weights, weights_from_errors, SHARPENING_EXPONENT};
