//! Replay verification.
//!
//! [`replay_and_compare`] streams recorded frames through a caller-provided
//! step function and reports the first hash mismatch.
//! [`replay_localizer`] is the ready-made driver for a [`Localizer`].

use std::io::Read;

use relief_core::Command;
use relief_engine::Localizer;

use crate::error::ReplayError;
use crate::hash::{config_hash, state_hash};
use crate::reader::ReplayReader;

/// The first step at which a replay disagreed with its recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DivergenceReport {
    /// Step index from the diverging frame.
    pub step: u64,
    /// Hash stored in the recording.
    pub recorded_hash: u64,
    /// Hash produced by the replay.
    pub replayed_hash: u64,
}

/// Replay a recording through `step_fn` and compare state hashes at
/// every frame.
///
/// `step_fn` receives each recorded command, applies it, and returns the
/// [`state_hash`] of the resulting state. Returns `Ok(None)` if every
/// frame matches, or the first divergence.
pub fn replay_and_compare<R: Read>(
    mut reader: ReplayReader<R>,
    step_fn: &mut dyn FnMut(Command) -> Result<u64, ReplayError>,
) -> Result<Option<DivergenceReport>, ReplayError> {
    while let Some(frame) = reader.next_frame()? {
        let replayed_hash = step_fn(frame.command)?;
        if replayed_hash != frame.state_hash {
            return Ok(Some(DivergenceReport {
                step: frame.step,
                recorded_hash: frame.state_hash,
                replayed_hash,
            }));
        }
    }
    Ok(None)
}

/// Re-run a recording on `localizer`.
///
/// Checks the configuration hash, resets the localizer to the recorded
/// seed, then applies every recorded command. A halt frame applies
/// nothing and compares the current state.
///
/// # Errors
///
/// [`ReplayError::ConfigMismatch`] if the localizer's configuration or
/// field differ from the recording; any decode or step error.
pub fn replay_localizer<R: Read>(
    reader: ReplayReader<R>,
    localizer: &mut Localizer,
) -> Result<Option<DivergenceReport>, ReplayError> {
    let init = reader.init_descriptor();
    let current = config_hash(localizer.config(), localizer.state().field());
    if current != init.config_hash {
        return Err(ReplayError::ConfigMismatch {
            recorded: init.config_hash,
            current,
        });
    }
    localizer.reset(init.seed);

    let report = replay_and_compare(reader, &mut |command| {
        if let Command::Drive(control) = command {
            localizer.step(control)?;
        }
        Ok(state_hash(localizer.state()))
    })?;

    match &report {
        Some(d) => log::warn!(
            "replay diverged at step {}: recorded {:#018x}, replayed {:#018x}",
            d.step,
            d.recorded_hash,
            d.replayed_hash
        ),
        None => log::info!("replay matched through step {}", localizer.current_step()),
    }
    Ok(report)
}
