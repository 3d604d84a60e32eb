//! Hashing utilities for state and configuration comparison.
//!
//! Uses FNV-1a over the exact bit patterns of every float, so two states
//! hash equal only if they are bit-identical. Not cryptographically
//! secure; used for fast equality checks during replay.

use relief_core::Pose;
use relief_engine::{LocalizerConfig, MeasurementPolicy, SimulationState};
use relief_field::ScalarField;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_f64(hash: u64, v: f64) -> u64 {
    fnv1a_u64(hash, v.to_bits())
}

fn fnv1a_pose(hash: u64, pose: &Pose) -> u64 {
    let hash = fnv1a_f64(hash, pose.x);
    let hash = fnv1a_f64(hash, pose.y);
    fnv1a_f64(hash, pose.theta)
}

/// Hash the true pose and every particle pose and weight, in order.
///
/// The field is static and covered by [`config_hash`] instead.
pub fn state_hash(state: &SimulationState) -> u64 {
    let particles = state.particles();
    let mut hash = fnv1a_pose(FNV_OFFSET, &state.true_pose());
    hash = fnv1a_u64(hash, particles.len() as u64);
    for (pose, weight) in particles.iter() {
        hash = fnv1a_pose(hash, pose);
        hash = fnv1a_f64(hash, weight);
    }
    hash
}

/// Hash every configuration scalar except the seed, plus the field
/// dimensions and samples.
///
/// The seed is recorded separately in the replay header so a run can be
/// re-seeded without invalidating the configuration check.
pub fn config_hash(config: &LocalizerConfig, field: &ScalarField) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u64(hash, config.particle_count as u64);
    hash = fnv1a_f64(hash, config.motion.sigma_step);
    hash = fnv1a_f64(hash, config.motion.sigma_turn);
    hash = fnv1a_f64(hash, config.sensor_sigma);
    hash = fnv1a_f64(hash, config.roughening.sigma_pos);
    hash = fnv1a_f64(hash, config.roughening.sigma_turn);
    hash = match config.initial_pose {
        Some(pose) => fnv1a_pose(fnv1a_byte(hash, 1), &pose),
        None => fnv1a_byte(hash, 0),
    };
    hash = fnv1a_byte(
        hash,
        match config.measurement {
            MeasurementPolicy::OnForwardMotion => 0,
            MeasurementPolicy::EveryStep => 1,
        },
    );
    hash = fnv1a_u32(hash, field.width());
    hash = fnv1a_u32(hash, field.height());
    for &v in field.data() {
        hash = fnv1a_u32(hash, v.to_bits());
    }
    hash
}
