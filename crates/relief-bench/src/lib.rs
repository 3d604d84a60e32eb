//! Benchmark profiles and utilities for the Relief workspace.
//!
//! Provides pre-built localizer setups for benchmarking and examples:
//!
//! - [`reference_profile`]: 640x480 terrain, 3000 particles (the classic tuning)
//! - [`stress_profile`]: 1280x960 terrain, 30000 particles
//! - [`patrol_script`]: a deterministic command loop that stays on the field

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use relief_core::{Control, FieldError};
use relief_engine::LocalizerConfig;
use relief_field::ScalarField;

/// Build the reference profile: 640x480 terrain with default tuning.
pub fn reference_profile(seed: u64) -> Result<(LocalizerConfig, ScalarField), FieldError> {
    let config = LocalizerConfig {
        seed,
        ..Default::default()
    };
    Ok((config, terrain(640, 480, seed)?))
}

/// Build the stress profile: 1280x960 terrain, 10x the particles.
pub fn stress_profile(seed: u64) -> Result<(LocalizerConfig, ScalarField), FieldError> {
    let config = LocalizerConfig {
        particle_count: 30_000,
        seed,
        ..Default::default()
    };
    Ok((config, terrain(1280, 960, seed)?))
}

/// Smooth synthetic terrain in `[0, 255]`.
///
/// A sum of three sinusoid pairs whose phases are derived from `seed`, so
/// different seeds give different but equally textured maps.
pub fn terrain(width: u32, height: u32, seed: u64) -> Result<ScalarField, FieldError> {
    let phase = |k: u64| {
        let mixed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(k.wrapping_mul(1442695040888963407));
        (mixed >> 11) as f64 / (1u64 << 53) as f64 * std::f64::consts::TAU
    };
    let (p0, p1, p2) = (phase(1), phase(2), phase(3));
    let (w, h) = (f64::from(width), f64::from(height));
    ScalarField::from_fn(width, height, |col, row| {
        let x = f64::from(col) / w;
        let y = f64::from(row) / h;
        let v = (x * 11.0 + p0).sin() * (y * 9.0 + p1).cos()
            + 0.5 * (x * 4.0 + y * 6.0 + p2).sin()
            + 0.25 * (x * 23.0).cos() * (y * 19.0).sin();
        (127.5 + 73.0 * v).clamp(0.0, 255.0) as f32
    })
}

/// `n` controls tracing a rounded square of side `5 * 12` cells:
/// twelve forward steps then a 90° turn, repeated.
pub fn patrol_script(n: usize) -> Vec<Control> {
    let quarter = std::f64::consts::FRAC_PI_2;
    (0..n)
        .map(|i| {
            if i % 13 == 12 {
                Control::new(0.0, quarter)
            } else {
                Control::new(5.0, 0.0)
            }
        })
        .collect()
}
