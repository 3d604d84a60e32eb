//! Integration test: weighting and resampling on hand-built fields.
//!
//! Exercises the measurement half of the pipeline (sense, weight,
//! resample) against small fields whose correct answer is known, plus
//! the statistical behaviour of the multinomial draw.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use relief_core::{Control, Pose};
use relief_filter::{
    compute_weights, draw_indices, resample, ParticleSet, ResampleOutcome, SensorModel,
};
use relief_test_utils::{cone_field, peak_field};

/// Chi-square critical value for 9 degrees of freedom at p = 0.001.
const CHI2_9DOF_P001: f64 = 27.877;

#[test]
fn uniform_weights_draw_indices_uniformly() {
    let weights = [1.0; 10];
    let trials = 2_000;
    let mut counts = [0usize; 10];
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..trials {
        let (indices, outcome) = draw_indices(&weights, weights.len(), &mut rng).unwrap();
        assert_eq!(outcome, ResampleOutcome::Weighted);
        for i in indices {
            counts[i] += 1;
        }
    }
    let expected = (trials * weights.len()) as f64 / weights.len() as f64;
    let chi2: f64 = counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum();
    assert!(
        chi2 < CHI2_9DOF_P001,
        "chi-square {chi2:.2} exceeds critical value; counts = {counts:?}"
    );
}

#[test]
fn single_peak_cell_gets_full_cubed_margin() {
    // 4x4 zeros with one 100-valued interior cell at (col 2, row 1).
    let field = peak_field(4, 4, 2, 1, 100.0);
    let sensor = SensorModel::new(2.0).unwrap();
    let truth = Pose::new(2.4, 1.6, 0.0);
    let observed = sensor.read_exact(&field, &truth).unwrap();
    assert_eq!(observed, 100.0);

    let mut set = ParticleSet::from_poses(vec![
        Pose::new(2.0, 1.0, 0.0),
        Pose::new(2.9, 1.9, 1.0),
        Pose::new(1.5, 1.5, 0.0),
        Pose::new(1.2, 2.7, 0.0),
    ]);
    compute_weights(&mut set, &field, &sensor, observed).unwrap();
    let w = set.weights();
    assert_eq!(w[0], 100.0f64.powi(3));
    assert_eq!(w[1], 100.0f64.powi(3));
    assert_eq!(w[2], 0.0);
    assert_eq!(w[3], 0.0);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    assert_eq!(resample(&mut set, &mut rng).unwrap(), ResampleOutcome::Weighted);
    for p in set.poses() {
        assert_eq!((p.x as u32, p.y as u32), (2, 1));
    }
}

#[test]
fn weights_strictly_decrease_with_distance_to_peak() {
    // Manhattan cone: 100 at (4, 4), dropping 10 per cell.
    let field = cone_field(9, 9, 4, 4, 100.0, 10.0);
    let sensor = SensorModel::new(0.0).unwrap();
    let observed = sensor.read_exact(&field, &Pose::new(4.5, 4.5, 0.0)).unwrap();

    // Interior particles at Manhattan distance 0..=4 from the peak.
    let mut set = ParticleSet::from_poses(vec![
        Pose::new(4.2, 4.7, 0.0),
        Pose::new(5.1, 4.0, 0.0),
        Pose::new(5.5, 5.5, 0.0),
        Pose::new(6.0, 5.0, 0.0),
        Pose::new(6.3, 6.3, 0.0),
    ]);
    compute_weights(&mut set, &field, &sensor, observed).unwrap();
    let w = set.weights();
    for pair in w.windows(2) {
        assert!(pair[0] > pair[1], "weights not strictly ordered: {w:?}");
    }
    assert_eq!(w[0], 40.0f64.powi(3));
    assert_eq!(w[4], 0.0);
}

#[test]
fn clipped_particle_gets_zero_weight_despite_perfect_match() {
    // Column 0 holds the observed value 5; column c >= 1 holds 10 * c.
    let field = relief_field::ScalarField::from_fn(8, 8, |col, _| {
        if col == 0 {
            5.0
        } else {
            10.0 * col as f32
        }
    })
    .unwrap();
    let sensor = SensorModel::new(0.0).unwrap();

    let mut set = ParticleSet::from_poses(vec![
        // Driven off the left edge and clipped back to x = 0.
        Pose::new(1.0, 3.0, std::f64::consts::PI),
        Pose::new(1.0, 3.0, 0.0),
        Pose::new(0.5, 3.0, 0.0),
    ]);
    set.move_all(Control::new(3.0, 0.0), &field);
    assert_eq!(set.poses()[0].x, 0.0);

    compute_weights(&mut set, &field, &sensor, 5.0).unwrap();
    let w = set.weights();
    // Particle 0 reads exactly 5 (error 0) yet is pinned to the edge.
    // Errors of the others: 35 (x = 4) and 25 (x = 3.5).
    assert_eq!(w[0], 0.0);
    assert_eq!(w[1], 0.0);
    assert_eq!(w[2], 1000.0);
}

#[test]
fn all_boundary_particles_resample_without_fault() {
    let field = peak_field(6, 6, 3, 3, 100.0);
    let sensor = SensorModel::new(0.0).unwrap();
    let mut set = ParticleSet::from_poses(vec![
        Pose::new(0.0, 2.0, 0.0),
        Pose::new(5.0, 2.0, 0.0),
        Pose::new(2.0, 0.0, 0.0),
        Pose::new(2.0, 5.0, 0.0),
    ]);
    compute_weights(&mut set, &field, &sensor, 100.0).unwrap();
    assert!(set.weights().iter().all(|&w| w == 0.0));

    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let outcome = resample(&mut set, &mut rng).unwrap();
    assert_eq!(outcome, ResampleOutcome::Degenerate);
    assert_eq!(set.len(), 4);
    assert!(set.poses().iter().all(|p| p.is_finite()));
    assert!(set.weights().iter().all(|w| w.is_finite()));
}
