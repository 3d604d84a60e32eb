//! Scalar field storage for Relief localization.
//!
//! A [`ScalarField`] is the known, static map the agent is localized
//! against: a row-major grid of `f32` samples with a bounds-checked,
//! nearest-cell lookup. Fields are built from already-decoded buffers;
//! image decoding is the caller's concern.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field;

pub use field::ScalarField;
pub use relief_core::FieldError;
