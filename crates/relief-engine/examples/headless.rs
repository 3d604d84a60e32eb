//! Headless localization demo.
//!
//! Builds a synthetic terrain, drives the agent with a scripted key
//! sequence, and logs how far the estimate is from the truth as the
//! population converges.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example headless

use relief_core::Pose;
use relief_engine::{
    run_until_halt, Frame, FrameSink, Key, Localizer, LocalizerConfig, Teleop, TeleopConfig,
};
use relief_field::ScalarField;

// ─── Terrain ────────────────────────────────────────────────────

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn terrain() -> Result<ScalarField, relief_core::FieldError> {
    ScalarField::from_fn(WIDTH, HEIGHT, |col, row| {
        let x = f64::from(col) / f64::from(WIDTH);
        let y = f64::from(row) / f64::from(HEIGHT);
        let hills = (x * 9.0).sin() * (y * 7.0).cos() + (x * 3.0 + y * 5.0).sin();
        (127.5 + 60.0 * hills).clamp(0.0, 255.0) as f32
    })
}

// ─── Sink: log error every few frames ───────────────────────────

struct ErrorLog {
    every: u64,
}

impl FrameSink for ErrorLog {
    fn present(&mut self, frame: &Frame<'_>) {
        if frame.step % self.every != 0 {
            return;
        }
        let (sx, sy) = frame.particles.spread();
        match frame.estimate {
            Some(Pose { x, y, .. }) => log::info!(
                "step {:>3}: truth ({:6.1}, {:6.1}) estimate ({:6.1}, {:6.1}) error {:6.2} spread ({:5.1}, {:5.1})",
                frame.step,
                frame.true_pose.x,
                frame.true_pose.y,
                x,
                y,
                frame.position_error().unwrap_or(f64::NAN),
                sx,
                sy,
            ),
            None => log::info!("step {:>3}: no particles", frame.step),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = LocalizerConfig {
        seed: 2024,
        ..Default::default()
    };
    let mut localizer = Localizer::new(config, terrain()?)?;

    // A loop around the lower-left quadrant.
    let mut keys = Vec::new();
    for _ in 0..4 {
        keys.extend(std::iter::repeat_n(Key::Forward, 12));
        keys.extend(std::iter::repeat_n(Key::TurnRight, 4));
    }
    keys.push(Key::Other);

    let mut source = Teleop::new(keys.into_iter(), TeleopConfig::default());
    let mut sink = ErrorLog { every: 8 };
    let summary = run_until_halt(&mut localizer, &mut source, &mut sink)?;

    println!(
        "{} steps, {} measurement updates, final error {:.2}",
        summary.steps,
        summary.measurement_updates,
        summary
            .final_estimate
            .map(|e| e.distance_to(&summary.final_true_pose))
            .unwrap_or(f64::NAN)
    );
    Ok(())
}
