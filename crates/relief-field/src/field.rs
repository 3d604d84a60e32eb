//! Row-major 2D grid of scalar samples with truncating lookup.

use relief_core::FieldError;

/// An immutable `width × height` grid of scalar samples.
///
/// Cell `(col, row)` lives at index `row * width + col`; the origin is the
/// top-left cell. Lookups by continuous position truncate toward zero to
/// pick a cell and never interpolate.
///
/// Out-of-range lookups are errors, not clamps. Keeping positions on the
/// field is the particle set's job, done visibly after every motion update.
///
/// # Examples
///
/// ```
/// use relief_field::ScalarField;
///
/// let field = ScalarField::from_fn(4, 3, |col, row| (row * 10 + col) as f32).unwrap();
/// assert_eq!(field.sample(2.9, 1.2).unwrap(), 12.0);
/// assert!(field.sample(4.0, 0.0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ScalarField {
    /// Build a field from a row-major sample buffer.
    ///
    /// # Errors
    ///
    /// - [`FieldError::EmptyField`] if either dimension is zero.
    /// - [`FieldError::DataLengthMismatch`] if `data.len() != width * height`.
    /// - [`FieldError::NonFiniteSample`] if any sample is NaN or infinite.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyField { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(FieldError::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(FieldError::NonFiniteSample { index });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a field with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Result<Self, FieldError> {
        Self::new(width, height, vec![value; width as usize * height as usize])
    }

    /// Build a field by evaluating `f(col, row)` for every cell.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> f32,
    ) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyField { width, height });
        }
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                data.push(f(col, row));
            }
        }
        Self::new(width, height, data)
    }

    /// Build a field from a decoded 8-bit grayscale image buffer.
    ///
    /// This is the hand-off point for map loaders: decode the image
    /// elsewhere and pass the row-major luminance bytes here.
    pub fn from_gray8(width: u32, height: u32, pixels: &[u8]) -> Result<Self, FieldError> {
        Self::new(width, height, pixels.iter().map(|&p| f32::from(p)).collect())
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    /// Largest on-field `x` coordinate, `width - 1`.
    pub fn max_x(&self) -> f64 {
        f64::from(self.width - 1)
    }

    /// Largest on-field `y` coordinate, `height - 1`.
    pub fn max_y(&self) -> f64 {
        f64::from(self.height - 1)
    }

    /// Row-major sample buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Sample at an integer cell, or `None` if the cell is off the grid.
    pub fn cell(&self, col: u32, row: u32) -> Option<f32> {
        if col < self.width && row < self.height {
            Some(self.data[row as usize * self.width as usize + col as usize])
        } else {
            None
        }
    }

    /// Sample at a continuous position, truncating toward zero.
    ///
    /// `(-0.5, 0.0)` truncates to cell `(0, 0)` and succeeds; `(-1.0, 0.0)`
    /// does not. NaN and infinite coordinates are always out of bounds.
    pub fn sample(&self, x: f64, y: f64) -> Result<f32, FieldError> {
        self.cell_index(x, y)
            .map(|idx| self.data[idx])
            .ok_or(FieldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }

    /// Whether [`sample`](Self::sample) would succeed at this position.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.cell_index(x, y).is_some()
    }

    /// Whether a position lies exactly on the clipping boundary.
    ///
    /// Uses exact floating-point equality against `0` and `width - 1`
    /// (resp. `height - 1`). Clipping assigns those literals, so a
    /// clipped coordinate compares equal; a coordinate that merely came
    /// close does not.
    pub fn is_on_border(&self, x: f64, y: f64) -> bool {
        x == 0.0 || x == self.max_x() || y == 0.0 || y == self.max_y()
    }

    /// Clamp a position into `[0, width-1] × [0, height-1]`.
    pub fn clamp_position(&self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(0.0, self.max_x()), y.clamp(0.0, self.max_y()))
    }

    fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        let col = x.trunc();
        let row = y.trunc();
        // Negated comparisons so NaN falls through to `None`.
        if !(col >= 0.0 && col < f64::from(self.width)) {
            return None;
        }
        if !(row >= 0.0 && row < f64::from(self.height)) {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp(width: u32, height: u32) -> ScalarField {
        ScalarField::from_fn(width, height, |col, row| (row * width + col) as f32).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            ScalarField::filled(0, 3, 1.0),
            Err(FieldError::EmptyField {
                width: 0,
                height: 3
            })
        );
        assert!(ScalarField::from_fn(3, 0, |_, _| 0.0).is_err());
    }

    #[test]
    fn rejects_wrong_buffer_length() {
        let err = ScalarField::new(3, 3, vec![0.0; 8]).unwrap_err();
        assert_eq!(
            err,
            FieldError::DataLengthMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn rejects_nan_samples() {
        let mut data = vec![0.0; 4];
        data[2] = f32::NAN;
        assert_eq!(
            ScalarField::new(2, 2, data),
            Err(FieldError::NonFiniteSample { index: 2 })
        );
    }

    #[test]
    fn gray8_maps_bytes_to_samples() {
        let f = ScalarField::from_gray8(2, 1, &[0, 255]).unwrap();
        assert_eq!(f.cell(0, 0), Some(0.0));
        assert_eq!(f.cell(1, 0), Some(255.0));
    }

    // ── Lookup ──────────────────────────────────────────────────

    #[test]
    fn row_major_layout() {
        let f = ramp(4, 3);
        assert_eq!(f.cell(3, 0), Some(3.0));
        assert_eq!(f.cell(0, 1), Some(4.0));
        assert_eq!(f.cell(3, 2), Some(11.0));
        assert_eq!(f.cell(4, 0), None);
        assert_eq!(f.cell(0, 3), None);
    }

    #[test]
    fn sample_truncates() {
        let f = ramp(4, 3);
        assert_eq!(f.sample(1.99, 0.0).unwrap(), 1.0);
        assert_eq!(f.sample(3.999, 2.999).unwrap(), 11.0);
        // Truncation toward zero keeps small negatives on cell 0.
        assert_eq!(f.sample(-0.5, -0.9).unwrap(), 0.0);
    }

    #[test]
    fn sample_out_of_bounds_is_an_error() {
        let f = ramp(4, 3);
        for (x, y) in [(4.0, 0.0), (0.0, 3.0), (-1.0, 0.0), (0.0, -1.0)] {
            match f.sample(x, y) {
                Err(FieldError::OutOfBounds { width, height, .. }) => {
                    assert_eq!((width, height), (4, 3));
                }
                other => panic!("expected OutOfBounds at ({x}, {y}), got {other:?}"),
            }
        }
        assert!(f.sample(f64::NAN, 0.0).is_err());
        assert!(f.sample(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn border_uses_exact_equality() {
        let f = ramp(10, 5);
        assert!(f.is_on_border(0.0, 2.0));
        assert!(f.is_on_border(9.0, 2.0));
        assert!(f.is_on_border(3.0, 0.0));
        assert!(f.is_on_border(3.0, 4.0));
        assert!(!f.is_on_border(1e-12, 2.0));
        assert!(!f.is_on_border(8.999_999, 2.0));
    }

    #[test]
    fn clamp_assigns_boundary_literals() {
        let f = ramp(10, 5);
        let (x, y) = f.clamp_position(-3.2, 17.0);
        assert_eq!((x, y), (0.0, 4.0));
        assert!(f.is_on_border(x, y));
    }

    proptest! {
        #[test]
        fn clamped_positions_are_always_sampleable(
            w in 1u32..50,
            h in 1u32..50,
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
        ) {
            let f = ScalarField::filled(w, h, 1.0).unwrap();
            let (cx, cy) = f.clamp_position(x, y);
            prop_assert!(cx >= 0.0 && cx <= f.max_x());
            prop_assert!(cy >= 0.0 && cy <= f.max_y());
            prop_assert!(f.sample(cx, cy).is_ok());
        }

        #[test]
        fn contains_agrees_with_sample(
            x in -5.0f64..15.0,
            y in -5.0f64..15.0,
        ) {
            let f = ramp(10, 10);
            prop_assert_eq!(f.contains(x, y), f.sample(x, y).is_ok());
        }
    }
}
