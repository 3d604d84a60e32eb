//! Data types for replay recording and playback.

use relief_core::Command;
use relief_engine::Localizer;

use crate::hash::config_hash;

/// Run initialization parameters stored in the replay header.
///
/// # Examples
///
/// ```
/// use relief_replay::InitDescriptor;
///
/// let init = InitDescriptor {
///     seed: 42,
///     config_hash: 0xDEAD_BEEF,
///     particle_count: 3000,
///     field_width: 640,
///     field_height: 480,
/// };
/// assert_eq!(init.seed, 42);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitDescriptor {
    /// Seed the localizer was (re)started with.
    pub seed: u64,
    /// Hash of the configuration and field, see [`config_hash`].
    pub config_hash: u64,
    /// Number of particles.
    pub particle_count: u64,
    /// Field width in cells.
    pub field_width: u32,
    /// Field height in cells.
    pub field_height: u32,
}

impl InitDescriptor {
    /// Describe a localizer as it stands now.
    ///
    /// Record this before the first step; replay re-seeds from `seed`.
    pub fn for_localizer(localizer: &Localizer) -> Self {
        let field = localizer.state().field();
        Self {
            seed: localizer.seed(),
            config_hash: config_hash(localizer.config(), field),
            particle_count: localizer.config().particle_count as u64,
            field_width: field.width(),
            field_height: field.height(),
        }
    }
}

/// One recorded step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Steps completed after this frame was applied.
    pub step: u64,
    /// The command that was applied.
    pub command: Command,
    /// [`state_hash`](crate::state_hash) of the state after the command.
    pub state_hash: u64,
}
