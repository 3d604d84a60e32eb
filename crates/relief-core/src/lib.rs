//! Core types for the Relief localization framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! pose and command value types shared by every other crate in the
//! workspace, plus the error enums that cross crate boundaries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod pose;

pub use command::{Command, Control};
pub use error::{FieldError, NoiseError, ResampleError, StepError};
pub use pose::Pose;
