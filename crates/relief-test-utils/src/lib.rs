//! Test fixtures and mock collaborators for Relief development.
//!
//! Provides hand-built fields whose correct localization answer is known
//! (see [`fixtures`]) and mock implementations of the engine's
//! collaborator traits ([`CommandSource`], [`FrameSink`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{cone_field, peak_field, ramp_field, uniform_field};

use std::collections::VecDeque;

use relief_core::{Command, Pose};
use relief_engine::{CommandSource, Frame, FrameSink};

/// Replays a fixed list of commands, then halts forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedCommands {
    queue: VecDeque<Command>,
    pulled: usize,
}

impl ScriptedCommands {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            queue: commands.into_iter().collect(),
            pulled: 0,
        }
    }

    /// `n` identical drive commands.
    pub fn repeat(forward: f64, turn: f64, n: usize) -> Self {
        Self::new(std::iter::repeat_n(Command::drive(forward, turn), n))
    }

    /// How many commands have been handed out, halts included.
    pub fn pulled(&self) -> usize {
        self.pulled
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl CommandSource for ScriptedCommands {
    fn next_command(&mut self) -> Command {
        self.pulled += 1;
        self.queue.pop_front().unwrap_or(Command::Halt)
    }
}

/// What a [`RecordingSink`] keeps from each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRecord {
    pub step: u64,
    pub true_pose: Pose,
    pub estimate: Option<Pose>,
    pub particle_count: usize,
    pub position_error: Option<f64>,
}

/// Records a summary of every presented frame.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<FrameRecord>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&FrameRecord> {
        self.frames.last()
    }
}

impl FrameSink for RecordingSink {
    fn present(&mut self, frame: &Frame<'_>) {
        self.frames.push(FrameRecord {
            step: frame.step,
            true_pose: frame.true_pose,
            estimate: frame.estimate,
            particle_count: frame.particles.len(),
            position_error: frame.position_error(),
        });
    }
}
