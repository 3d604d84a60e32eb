//! Key-driven command source.
//!
//! Maps the classic arrow-key bindings to commands: up drives forward one
//! step, left and right turn in place, anything else halts.

use relief_core::{Command, Control};

use crate::driver::CommandSource;

/// A key press, already decoded by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Up arrow.
    Forward,
    /// Left arrow.
    TurnLeft,
    /// Right arrow.
    TurnRight,
    /// Any other key.
    Other,
}

/// Step sizes for key-driven control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeleopConfig {
    /// Forward distance per press, in cells. Default: 5.
    pub step: f64,
    /// Turn per press, in radians. Default: 25°.
    pub turn: f64,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            step: 5.0,
            turn: 25f64.to_radians(),
        }
    }
}

impl TeleopConfig {
    /// The command a single key press stands for.
    ///
    /// Right turns are positive, matching a y-down image frame where
    /// increasing heading rotates clockwise on screen.
    pub fn command_for(&self, key: Key) -> Command {
        match key {
            Key::Forward => Command::Drive(Control::new(self.step, 0.0)),
            Key::TurnRight => Command::Drive(Control::new(0.0, self.turn)),
            Key::TurnLeft => Command::Drive(Control::new(0.0, -self.turn)),
            Key::Other => Command::Halt,
        }
    }
}

/// [`CommandSource`] over a stream of key presses.
///
/// Halts when the stream ends.
#[derive(Clone, Debug)]
pub struct Teleop<I> {
    keys: I,
    config: TeleopConfig,
}

impl<I: Iterator<Item = Key>> Teleop<I> {
    /// Wrap a key stream.
    pub fn new(keys: I, config: TeleopConfig) -> Self {
        Self { keys, config }
    }
}

impl<I: Iterator<Item = Key>> CommandSource for Teleop<I> {
    fn next_command(&mut self) -> Command {
        match self.keys.next() {
            Some(key) => self.config.command_for(key),
            None => Command::Halt,
        }
    }
}
