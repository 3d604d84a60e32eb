//! Deterministic replay for Relief localization runs.
//!
//! Records the command stream of a run together with a hash of the
//! post-step state, and verifies that re-running the same commands from
//! the same seed reproduces every hash bit for bit.
//!
//! # Architecture
//!
//! - [`ReplayWriter`] records frames to any `Write` sink
//! - [`ReplayReader`] plays back frames from any `Read` source
//! - [`replay_and_compare`] and [`replay_localizer`] verify determinism
//! - All I/O uses a small hand-written binary codec
//!
//! # Format
//!
//! ```text
//! [MAGIC "RLIF"] [VERSION u8] [InitDescriptor]
//! [Frame 1] [Frame 2] ... [Frame N]
//! ```
//!
//! Each frame holds the step index, the command applied, and an FNV-1a
//! hash of the state after applying it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod compare;
pub mod error;
pub mod hash;
pub mod reader;
pub mod types;
pub mod writer;

pub use compare::{replay_and_compare, replay_localizer, DivergenceReport};
pub use error::ReplayError;
pub use hash::{config_hash, state_hash};
pub use reader::{FrameIter, ReplayReader};
pub use types::{Frame, InitDescriptor};
pub use writer::ReplayWriter;

/// Magic bytes at the start of every replay file.
pub const MAGIC: [u8; 4] = *b"RLIF";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
