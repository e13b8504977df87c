//! Grid quantization.

use crate::finite_or_zero;

/// Round a position to the nearest grid intersection.
///
/// Identity when `enabled` is false or the grid size is not a positive,
/// finite number. Non-finite coordinates come back as zero.
pub fn snap_to_grid(x: f64, y: f64, grid_size: f64, enabled: bool) -> (f64, f64) {
    let x = finite_or_zero(x);
    let y = finite_or_zero(y);

    if !enabled || !grid_size.is_finite() || grid_size <= 0.0 {
        return (x, y);
    }

    (
        (x / grid_size).round() * grid_size,
        (y / grid_size).round() * grid_size,
    )
}
