//! Per-step performance metrics for the localizer.
//!
//! [`StepMetrics`] captures per-stage timing for a single step plus
//! cumulative counters since construction or the last reset.

/// Timing and counters collected during a single step.
///
/// All durations are in microseconds. Stages skipped by the measurement
/// policy report zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent moving the true agent and the particles, in microseconds.
    pub motion_us: u64,
    /// Time spent taking the true agent's reading, in microseconds.
    pub sense_us: u64,
    /// Time spent scoring particles, in microseconds.
    pub weighting_us: u64,
    /// Time spent redrawing the population, in microseconds.
    pub resample_us: u64,
    /// Time spent jittering the population, in microseconds.
    pub roughen_us: u64,
    /// Cumulative number of completed steps.
    pub steps: u64,
    /// Cumulative number of steps that ran the measurement half.
    pub measurement_updates: u64,
    /// Cumulative number of resamples that fell back to a uniform draw.
    pub degenerate_resamples: u64,
}
