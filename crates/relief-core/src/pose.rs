//! Planar pose of the agent or of a single particle hypothesis.

use std::fmt;

/// Position and heading on the field.
///
/// `x` grows to the right and `y` grows downward (image convention, origin
/// at the top-left cell). `theta` is in radians and is never wrapped: it
/// accumulates every turn ever applied and is only consumed through
/// `sin`/`cos`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// Column coordinate, in cells.
    pub x: f64,
    /// Row coordinate, in cells.
    pub y: f64,
    /// Heading in radians.
    pub theta: f64,
}

impl Pose {
    /// Create a pose from its components.
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// Move `distance` along the current heading, then rotate by `turn`.
    ///
    /// The translation uses the heading *before* the rotation is applied.
    pub fn advanced(self, distance: f64, turn: f64) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self {
            x: self.x + distance * cos,
            y: self.y + distance * sin,
            theta: self.theta + turn,
        }
    }

    /// Euclidean distance between the positions of two poses.
    pub fn distance_to(&self, other: &Pose) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.theta.is_finite()
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}, {:.1}°)",
            self.x,
            self.y,
            self.theta.to_degrees()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn advanced_translates_along_heading() {
        let p = Pose::new(10.0, 10.0, 0.0).advanced(5.0, 0.0);
        assert!((p.x - 15.0).abs() < 1e-12);
        assert!((p.y - 10.0).abs() < 1e-12);

        let p = Pose::new(10.0, 10.0, FRAC_PI_2).advanced(5.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn advanced_uses_heading_before_turn() {
        let p = Pose::new(0.0, 0.0, 0.0).advanced(1.0, FRAC_PI_2);
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!((p.theta - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn heading_is_not_wrapped() {
        let mut p = Pose::default();
        for _ in 0..10 {
            p = p.advanced(0.0, std::f64::consts::PI);
        }
        assert!((p.theta - 10.0 * std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn distance_ignores_heading() {
        let a = Pose::new(0.0, 0.0, 1.0);
        let b = Pose::new(3.0, 4.0, -2.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn finiteness() {
        assert!(Pose::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Pose::new(f64::NAN, 2.0, 3.0).is_finite());
        assert!(!Pose::new(1.0, 2.0, f64::INFINITY).is_finite());
    }
}
