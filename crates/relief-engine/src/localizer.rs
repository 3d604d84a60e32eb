//! Synchronous localizer.
//!
//! [`Localizer`] is the primary user-facing API. Each call to
//! [`step()`](Localizer::step) applies one control to the true agent and
//! the particle population and, when the [`MeasurementPolicy`] says so,
//! runs the measurement half of the pipeline:
//!
//! ```text
//! motion → sense → weight → resample → jitter
//! ```
//!
//! # Ownership model
//!
//! All mutating methods take `&mut self`, and [`state()`](Localizer::state)
//! hands out a borrow of `self`. The caller cannot step while holding a
//! reference into the particle set.
//!
//! # Randomness
//!
//! One [`ChaCha8Rng`] seeded from [`LocalizerConfig::seed`] feeds every
//! stochastic stage in a fixed order, so the same seed, field and command
//! sequence reproduce bit-identical state.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use relief_core::{Control, Pose, StepError};
use relief_field::ScalarField;
use relief_filter::{
    compute_weights, resample, MotionModel, ParticleSet, ResampleOutcome, Roughener, SensorModel,
};

use crate::config::{ConfigError, LocalizerConfig, MeasurementPolicy};
use crate::metrics::StepMetrics;
use crate::state::SimulationState;

// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Localizer>();
    }
};

// ── StepReport ──────────────────────────────────────────────────

/// Result of a successful [`Localizer::step()`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// 1-based index of the step just completed.
    pub step: u64,
    /// The true agent's noisy reading, if a measurement was taken.
    pub observation: Option<f64>,
    /// How the population was redrawn, if a measurement was taken.
    pub resample: Option<ResampleOutcome>,
    /// Performance metrics for this step.
    pub metrics: StepMetrics,
}

impl StepReport {
    /// Whether the measurement half of the pipeline ran.
    pub fn measured(&self) -> bool {
        self.observation.is_some()
    }
}

// ── Counters ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default)]
struct Counters {
    steps: u64,
    measurement_updates: u64,
    degenerate_resamples: u64,
}

// ── Localizer ───────────────────────────────────────────────────

/// Single-threaded Monte Carlo localizer.
///
/// # Example
///
/// ```
/// use relief_core::Control;
/// use relief_engine::{Localizer, LocalizerConfig};
/// use relief_field::ScalarField;
///
/// let field = ScalarField::from_fn(64, 64, |col, row| ((col * 7 + row * 3) % 256) as f32).unwrap();
/// let config = LocalizerConfig { particle_count: 200, ..Default::default() };
/// let mut localizer = Localizer::new(config, field).unwrap();
/// let report = localizer.step(Control::new(5.0, 0.0)).unwrap();
/// assert!(report.measured());
/// assert_eq!(localizer.state().particles().len(), 200);
/// ```
pub struct Localizer {
    config: LocalizerConfig,
    state: SimulationState,
    motion: MotionModel,
    sensor: SensorModel,
    roughener: Roughener,
    rng: ChaCha8Rng,
    counters: Counters,
    last_metrics: StepMetrics,
}

impl Localizer {
    /// Create a localizer over `field`.
    ///
    /// Validates the configuration, places the true agent at its initial
    /// pose and scatters `particle_count` particles uniformly over the
    /// field with uniform headings in `[0, 2π)`.
    pub fn new(config: LocalizerConfig, field: ScalarField) -> Result<Self, ConfigError> {
        config.validate(&field)?;
        let (motion, sensor, roughener) = config.models()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let true_pose = config.initial_pose_on(&field);
        let particles = ParticleSet::uniform(config.particle_count, &field, &mut rng);
        log::info!(
            "localizer ready: {}x{} field, {} particles, seed {}",
            field.width(),
            field.height(),
            config.particle_count,
            config.seed
        );
        Ok(Self {
            state: SimulationState::new(field, true_pose, particles),
            config,
            motion,
            sensor,
            roughener,
            rng,
            counters: Counters::default(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Execute one step with the given control.
    ///
    /// # Errors
    ///
    /// - [`StepError::Field`] if the true agent has left the field and
    ///   cannot be sensed. Motion for this step has already been applied.
    /// - [`StepError::Resample`] if the weights are unusable.
    ///
    /// Both are fatal for the run; the localizer is not rolled back.
    pub fn step(&mut self, control: Control) -> Result<StepReport, StepError> {
        let step_start = Instant::now();
        let mut metrics = StepMetrics::default();
        let state = &mut self.state;

        let motion_start = Instant::now();
        state.true_pose = self.motion.advance(state.true_pose, control, &mut self.rng);
        state.particles.move_all(control, &state.field);
        metrics.motion_us = motion_start.elapsed().as_micros() as u64;

        let mut observation = None;
        let mut outcome = None;
        if self.config.measurement.measures(control.forward) {
            let sense_start = Instant::now();
            let observed = self
                .sensor
                .read_noisy(&state.field, &state.true_pose, &mut self.rng)?;
            metrics.sense_us = sense_start.elapsed().as_micros() as u64;

            let weighting_start = Instant::now();
            compute_weights(&mut state.particles, &state.field, &self.sensor, observed)?;
            metrics.weighting_us = weighting_start.elapsed().as_micros() as u64;

            let resample_start = Instant::now();
            let drawn = resample(&mut state.particles, &mut self.rng)?;
            metrics.resample_us = resample_start.elapsed().as_micros() as u64;

            let roughen_start = Instant::now();
            self.roughener.jitter(&mut state.particles, &mut self.rng);
            metrics.roughen_us = roughen_start.elapsed().as_micros() as u64;

            self.counters.measurement_updates += 1;
            if drawn == ResampleOutcome::Degenerate {
                self.counters.degenerate_resamples += 1;
            }
            observation = Some(observed);
            outcome = Some(drawn);
        }

        self.counters.steps += 1;
        metrics.steps = self.counters.steps;
        metrics.measurement_updates = self.counters.measurement_updates;
        metrics.degenerate_resamples = self.counters.degenerate_resamples;
        metrics.total_us = step_start.elapsed().as_micros() as u64;

        log::debug!(
            "step {}: control ({:.3}, {:.3}), observation {:?}, resample {:?}, {} us",
            self.counters.steps,
            control.forward,
            control.turn,
            observation,
            outcome,
            metrics.total_us
        );

        self.last_metrics = metrics.clone();
        Ok(StepReport {
            step: self.counters.steps,
            observation,
            resample: outcome,
            metrics,
        })
    }

    /// Reset to step 0 with a new seed.
    ///
    /// Returns the true agent to its initial pose, re-scatters the
    /// population, and clears all counters. The field and noise models
    /// are kept.
    pub fn reset(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        let field = &self.state.field;
        self.state.true_pose = self.config.initial_pose_on(field);
        self.state.particles = ParticleSet::uniform(self.config.particle_count, field, &mut self.rng);
        self.counters = Counters::default();
        self.last_metrics = StepMetrics::default();
        log::info!("localizer reset with seed {seed}");
    }

    /// Read-only view of the field, true pose, and particles.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Best-guess pose from the current population.
    pub fn estimate(&self) -> Option<Pose> {
        self.state.particles.estimate()
    }

    /// Number of steps completed since construction or the last reset.
    pub fn current_step(&self) -> u64 {
        self.counters.steps
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The current seed.
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// The configuration this localizer was built from, with the
    /// current seed.
    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    /// The active measurement policy.
    pub fn measurement_policy(&self) -> MeasurementPolicy {
        self.config.measurement
    }
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("current_step", &self.counters.steps)
            .field("seed", &self.config.seed)
            .field("particles", &self.state.particles.len())
            .field("true_pose", &self.state.true_pose)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_core::FieldError;

    fn textured_field() -> ScalarField {
        ScalarField::from_fn(60, 40, |col, row| ((col * 13 + row * 7) % 200) as f32).unwrap()
    }

    fn small_config(seed: u64) -> LocalizerConfig {
        LocalizerConfig {
            particle_count: 300,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn new_scatters_particles_on_field() {
        let loc = Localizer::new(small_config(1), textured_field()).unwrap();
        let state = loc.state();
        assert_eq!(state.particles().len(), 300);
        assert_eq!(state.true_pose(), Pose::new(15.0, 10.0, 0.0));
        for p in state.particles().poses() {
            assert!((0.0..60.0).contains(&p.x));
            assert!((0.0..40.0).contains(&p.y));
            assert!((0.0..std::f64::consts::TAU).contains(&p.theta));
        }
        assert_eq!(loc.current_step(), 0);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = LocalizerConfig {
            particle_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            Localizer::new(cfg, textured_field()),
            Err(ConfigError::ZeroParticles)
        ));
    }

    #[test]
    fn pure_turn_skips_measurement_by_default() {
        let mut loc = Localizer::new(small_config(2), textured_field()).unwrap();
        let before: Vec<Pose> = loc.state().particles().poses().to_vec();
        let report = loc.step(Control::new(0.0, 0.5)).unwrap();
        assert!(!report.measured());
        assert_eq!(report.resample, None);
        assert_eq!(report.metrics.measurement_updates, 0);
        assert_eq!(report.metrics.steps, 1);
        // Headings turn exactly; positions only see the clip.
        for (b, a) in before.iter().zip(loc.state().particles().poses()) {
            assert_eq!(a.x, b.x.min(59.0));
            assert_eq!(a.y, b.y.min(39.0));
            assert_eq!(a.theta, b.theta + 0.5);
        }
        assert!(loc.state().particles().weights().iter().all(|&w| w == 1.0));
    }

    #[test]
    fn every_step_policy_measures_on_turns() {
        let cfg = LocalizerConfig {
            measurement: MeasurementPolicy::EveryStep,
            ..small_config(3)
        };
        let mut loc = Localizer::new(cfg, textured_field()).unwrap();
        let report = loc.step(Control::new(0.0, 0.5)).unwrap();
        assert!(report.measured());
        assert_eq!(loc.last_metrics().measurement_updates, 1);
    }

    #[test]
    fn forward_step_measures_and_keeps_population_size() {
        let mut loc = Localizer::new(small_config(4), textured_field()).unwrap();
        for i in 1..=5 {
            let report = loc.step(Control::new(2.0, 0.1)).unwrap();
            assert_eq!(report.step, i);
            assert!(report.measured());
            assert_eq!(loc.state().particles().len(), 300);
        }
        assert_eq!(loc.last_metrics().measurement_updates, 5);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = |seed| {
            let mut loc = Localizer::new(small_config(seed), textured_field()).unwrap();
            for _ in 0..4 {
                loc.step(Control::new(3.0, 0.2)).unwrap();
            }
            (
                loc.state().true_pose(),
                loc.state().particles().poses().to_vec(),
            )
        };
        assert_eq!(run(11), run(11));
        assert_ne!(run(11), run(12));
    }

    #[test]
    fn reset_matches_fresh_construction() {
        let mut loc = Localizer::new(small_config(5), textured_field()).unwrap();
        loc.step(Control::new(3.0, 0.0)).unwrap();
        loc.reset(9);
        let fresh = Localizer::new(small_config(9), textured_field()).unwrap();
        assert_eq!(loc.seed(), 9);
        assert_eq!(loc.current_step(), 0);
        assert_eq!(loc.state().true_pose(), fresh.state().true_pose());
        assert_eq!(
            loc.state().particles().poses(),
            fresh.state().particles().poses()
        );
        assert_eq!(loc.last_metrics(), &StepMetrics::default());
    }

    #[test]
    fn driving_off_the_field_is_fatal() {
        let cfg = LocalizerConfig {
            initial_pose: Some(Pose::new(2.0, 20.0, std::f64::consts::PI)),
            motion: crate::MotionNoise {
                sigma_step: 0.0,
                sigma_turn: 0.0,
            },
            ..small_config(6)
        };
        let mut loc = Localizer::new(cfg, textured_field()).unwrap();
        let err = loc.step(Control::new(5.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            StepError::Field(FieldError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn uniform_field_counts_degenerate_resamples() {
        let field = ScalarField::filled(30, 30, 100.0).unwrap();
        let mut loc = Localizer::new(small_config(7), field).unwrap();
        for _ in 0..3 {
            let report = loc.step(Control::new(1.0, 0.0)).unwrap();
            assert_eq!(report.resample, Some(ResampleOutcome::Degenerate));
        }
        assert_eq!(loc.last_metrics().degenerate_resamples, 3);
    }
}
