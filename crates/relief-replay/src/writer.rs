//! Replay recording writer.
//!
//! [`ReplayWriter`] streams frames to any `Write` sink. The header is
//! written immediately on construction.

use std::io::Write;

use relief_core::Command;
use relief_engine::SimulationState;

use crate::codec::{encode_frame, encode_header};
use crate::error::ReplayError;
use crate::hash::state_hash;
use crate::types::{Frame, InitDescriptor};

/// Writes replay data to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use relief_core::Command;
/// use relief_replay::{Frame, InitDescriptor, ReplayReader, ReplayWriter};
///
/// let init = InitDescriptor {
///     seed: 42,
///     config_hash: 0,
///     particle_count: 10,
///     field_width: 8,
///     field_height: 8,
/// };
///
/// let mut buf = Vec::new();
/// let mut writer = ReplayWriter::new(&mut buf, &init).unwrap();
/// for step in 1..=2u64 {
///     let frame = Frame { step, command: Command::drive(1.0, 0.0), state_hash: step };
///     writer.write_raw_frame(&frame).unwrap();
/// }
/// assert_eq!(writer.frames_written(), 2);
/// drop(writer);
///
/// let mut reader = ReplayReader::open(buf.as_slice()).unwrap();
/// assert_eq!(reader.init_descriptor(), &init);
/// assert_eq!(reader.next_frame().unwrap().unwrap().step, 1);
/// assert_eq!(reader.next_frame().unwrap().unwrap().step, 2);
/// assert!(reader.next_frame().unwrap().is_none());
/// ```
pub struct ReplayWriter<W: Write> {
    writer: W,
    frames_written: u64,
}

impl<W: Write> ReplayWriter<W> {
    /// Create a new replay writer, immediately writing the header.
    pub fn new(mut writer: W, init: &InitDescriptor) -> Result<Self, ReplayError> {
        encode_header(&mut writer, init)?;
        Ok(Self {
            writer,
            frames_written: 0,
        })
    }

    /// Record a frame: hash `state` (the state after `command` was
    /// applied) and write it.
    pub fn write_frame(
        &mut self,
        step: u64,
        command: Command,
        state: &SimulationState,
    ) -> Result<(), ReplayError> {
        let frame = Frame {
            step,
            command,
            state_hash: state_hash(state),
        };
        self.write_raw_frame(&frame)
    }

    /// Write a pre-built frame directly.
    pub fn write_raw_frame(&mut self, frame: &Frame) -> Result<(), ReplayError> {
        encode_frame(&mut self.writer, frame)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
