//! Hand-built scalar fields.
//!
//! - [`uniform_field`]: every cell equal; no location information at all.
//! - [`peak_field`]: zeros with one raised cell.
//! - [`cone_field`]: Manhattan cone falling off linearly from a peak.
//! - [`ramp_field`]: value grows with column index.

use relief_field::ScalarField;

pub fn uniform_field(width: u32, height: u32, value: f32) -> ScalarField {
    ScalarField::filled(width, height, value).expect("fixture dimensions must be non-zero")
}

/// All zeros except `value` at `(col, row)`.
pub fn peak_field(width: u32, height: u32, col: u32, row: u32, value: f32) -> ScalarField {
    ScalarField::from_fn(width, height, |c, r| if (c, r) == (col, row) { value } else { 0.0 })
        .expect("fixture dimensions must be non-zero")
}

/// `peak - slope * manhattan((c, r), (col, row))`, floored at zero.
pub fn cone_field(width: u32, height: u32, col: u32, row: u32, peak: f32, slope: f32) -> ScalarField {
    ScalarField::from_fn(width, height, |c, r| {
        let d = c.abs_diff(col) + r.abs_diff(row);
        (peak - slope * d as f32).max(0.0)
    })
    .expect("fixture dimensions must be non-zero")
}

/// `step * col` in every row.
pub fn ramp_field(width: u32, height: u32, step: f32) -> ScalarField {
    ScalarField::from_fn(width, height, |c, _| step * c as f32)
        .expect("fixture dimensions must be non-zero")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cone_peaks_at_center_and_floors_at_zero() {
        let f = cone_field(9, 9, 4, 4, 100.0, 10.0);
        assert_eq!(f.cell(4, 4), Some(100.0));
        assert_eq!(f.cell(5, 4), Some(90.0));
        assert_eq!(f.cell(0, 0), Some(20.0));
        let steep = cone_field(9, 9, 4, 4, 10.0, 10.0);
        assert_eq!(steep.cell(0, 0), Some(0.0));
    }

    #[test]
    fn peak_has_single_raised_cell() {
        let f = peak_field(4, 4, 2, 1, 100.0);
        assert_eq!(f.data().iter().filter(|&&v| v != 0.0).count(), 1);
        assert_eq!(f.cell(2, 1), Some(100.0));
    }
}
