//! Binary encode/decode for the replay format.
//!
//! All integers and floats are little-endian. There is no compression,
//! padding, or self-describing schema; every frame has the same size.

use std::io::{Read, Write};

use relief_core::{Command, Control};

use crate::error::ReplayError;
use crate::types::{Frame, InitDescriptor};
use crate::{FORMAT_VERSION, MAGIC};

/// Command tag for [`Command::Drive`].
pub const TAG_DRIVE: u8 = 0;
/// Command tag for [`Command::Halt`].
pub const TAG_HALT: u8 = 1;

/// Encoded size of one frame in bytes.
pub const FRAME_LEN: usize = 8 + 1 + 8 + 8 + 8;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ReplayError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian f64.
pub fn write_f64_le(w: &mut dyn Write, v: f64) -> Result<(), ReplayError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, ReplayError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, ReplayError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, ReplayError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian f64.
pub fn read_f64_le(r: &mut dyn Read) -> Result<f64, ReplayError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the replay header (magic, version, init descriptor).
pub fn encode_header(w: &mut dyn Write, init: &InitDescriptor) -> Result<(), ReplayError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_u64_le(w, init.seed)?;
    write_u64_le(w, init.config_hash)?;
    write_u64_le(w, init.particle_count)?;
    write_u32_le(w, init.field_width)?;
    write_u32_le(w, init.field_height)?;
    Ok(())
}

/// Decode and validate the replay header.
pub fn decode_header(r: &mut dyn Read) -> Result<InitDescriptor, ReplayError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ReplayError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: version });
    }

    Ok(InitDescriptor {
        seed: read_u64_le(r)?,
        config_hash: read_u64_le(r)?,
        particle_count: read_u64_le(r)?,
        field_width: read_u32_le(r)?,
        field_height: read_u32_le(r)?,
    })
}

// ── Frame encode/decode ─────────────────────────────────────────

/// Encode a single replay frame.
///
/// A halt is written with zero forward and turn so every frame has the
/// same length.
pub fn encode_frame(w: &mut dyn Write, frame: &Frame) -> Result<(), ReplayError> {
    write_u64_le(w, frame.step)?;
    match frame.command {
        Command::Drive(control) => {
            write_u8(w, TAG_DRIVE)?;
            write_f64_le(w, control.forward)?;
            write_f64_le(w, control.turn)?;
        }
        Command::Halt => {
            write_u8(w, TAG_HALT)?;
            write_f64_le(w, 0.0)?;
            write_f64_le(w, 0.0)?;
        }
    }
    write_u64_le(w, frame.state_hash)?;
    Ok(())
}

/// Decode a single replay frame.
///
/// Returns `Ok(None)` on clean EOF (no bytes available), `Ok(Some(frame))`
/// on success, or an error on truncated or corrupt data.
pub fn decode_frame(r: &mut dyn Read) -> Result<Option<Frame>, ReplayError> {
    // Read the step header by hand to tell clean EOF (zero bytes) from
    // truncation (1-7 bytes).
    let mut step_buf = [0u8; 8];
    let mut filled = 0;
    while filled < 8 {
        match r.read(&mut step_buf[filled..]) {
            Ok(0) => {
                if filled == 0 {
                    return Ok(None);
                }
                return Err(ReplayError::MalformedFrame {
                    detail: format!("truncated frame header: got {filled} of 8 bytes for step"),
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ReplayError::Io(e)),
        }
    }
    let step = u64::from_le_bytes(step_buf);

    let body = |e: ReplayError| match e {
        ReplayError::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            ReplayError::MalformedFrame {
                detail: format!("truncated body in frame for step {step}"),
            }
        }
        other => other,
    };

    let tag = read_u8(r).map_err(body)?;
    let forward = read_f64_le(r).map_err(body)?;
    let turn = read_f64_le(r).map_err(body)?;
    let state_hash = read_u64_le(r).map_err(body)?;

    let command = match tag {
        TAG_DRIVE => Command::Drive(Control::new(forward, turn)),
        TAG_HALT => Command::Halt,
        tag => return Err(ReplayError::UnknownCommandTag { tag }),
    };

    Ok(Some(Frame {
        step,
        command,
        state_hash,
    }))
}
