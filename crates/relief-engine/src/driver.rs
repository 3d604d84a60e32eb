//! Seams to the input and display collaborators, and the run loop.
//!
//! Acquiring commands (keyboard, script, network) and drawing frames are
//! outside the engine. [`CommandSource`] and [`FrameSink`] are the two
//! traits a host implements; [`run_until_halt`] wires them to a
//! [`Localizer`].

use relief_core::{Command, Pose, StepError};
use relief_field::ScalarField;
use relief_filter::ParticleSet;

use crate::localizer::Localizer;

// ── Collaborator traits ─────────────────────────────────────────

/// Supplies one command per step.
pub trait CommandSource {
    /// The next command. [`Command::Halt`] ends the run.
    fn next_command(&mut self) -> Command;
}

/// Receives a read-only view of the state once per step.
pub trait FrameSink {
    /// Present `frame`. Called before each command is pulled, so the
    /// initial state is shown before the first step.
    fn present(&mut self, frame: &Frame<'_>);
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Steps completed so far.
    pub step: u64,
    /// The map.
    pub field: &'a ScalarField,
    /// Where the agent really is.
    pub true_pose: Pose,
    /// The hypothesis population.
    pub particles: &'a ParticleSet,
    /// Mean-particle estimate.
    pub estimate: Option<Pose>,
}

impl<'a> Frame<'a> {
    /// Capture the current state of `localizer`.
    pub fn capture(localizer: &'a Localizer) -> Self {
        let state = localizer.state();
        Self {
            step: localizer.current_step(),
            field: state.field(),
            true_pose: state.true_pose(),
            particles: state.particles(),
            estimate: localizer.estimate(),
        }
    }

    /// Distance between the estimate and the true position, if any.
    pub fn position_error(&self) -> Option<f64> {
        self.estimate.map(|e| e.distance_to(&self.true_pose))
    }
}

/// A sink that discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &Frame<'_>) {}
}

// ── Run loop ────────────────────────────────────────────────────

/// Outcome of a completed [`run_until_halt`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Steps executed before the halt.
    pub steps: u64,
    /// Steps that ran the measurement half.
    pub measurement_updates: u64,
    /// Resamples that fell back to a uniform draw.
    pub degenerate_resamples: u64,
    /// The true pose when the run stopped.
    pub final_true_pose: Pose,
    /// The estimate when the run stopped.
    pub final_estimate: Option<Pose>,
}

/// Present, pull a command, step; repeat until [`Command::Halt`].
///
/// A final frame is presented after the last step, before the halt is
/// pulled, so the sink always sees the end state.
///
/// # Errors
///
/// Returns the first [`StepError`]; the run stops there.
pub fn run_until_halt(
    localizer: &mut Localizer,
    source: &mut dyn CommandSource,
    sink: &mut dyn FrameSink,
) -> Result<RunSummary, StepError> {
    let start_step = localizer.current_step();
    let start_updates = localizer.last_metrics().measurement_updates;
    let start_degenerate = localizer.last_metrics().degenerate_resamples;
    loop {
        sink.present(&Frame::capture(localizer));
        match source.next_command() {
            Command::Halt => break,
            Command::Drive(control) => {
                localizer.step(control)?;
            }
        }
    }
    let metrics = localizer.last_metrics();
    let summary = RunSummary {
        steps: localizer.current_step() - start_step,
        measurement_updates: metrics.measurement_updates - start_updates,
        degenerate_resamples: metrics.degenerate_resamples - start_degenerate,
        final_true_pose: localizer.state().true_pose(),
        final_estimate: localizer.estimate(),
    };
    log::info!(
        "halted after {} steps ({} measurement updates, {} degenerate)",
        summary.steps,
        summary.measurement_updates,
        summary.degenerate_resamples
    );
    Ok(summary)
}
