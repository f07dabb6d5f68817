//! # Cell Arithmetic
//!
//! Conversions between continuous world coordinates and integer cell indices.

/// World coordinate of the low edge of `cell`.
pub fn cell_origin(cell: i32, cell_size: f32) -> f32 {
    cell as f32 * cell_size
}

/// Index of the cell containing `coord`, flooring toward negative infinity.
///
/// The result is corrected against [`cell_origin`] so the two functions agree
/// exactly: `floor_to_cell(cell_origin(i, s), s) == i` for every in-range `i`,
/// even when `i * s` is not exactly representable. `cell_size` must be
/// positive and finite. NaN maps to `i32::MIN`.
///
/// # Examples
///
/// ```
/// use homestead::utils::floor_to_cell;
///
/// assert_eq!(floor_to_cell(-0.5, 1.0), -1);
/// assert_eq!(floor_to_cell(63.9, 32.0), 1);
/// assert_eq!(floor_to_cell(64.0, 32.0), 2);
/// ```
pub fn floor_to_cell(coord: f32, cell_size: f32) -> i32 {
    if !coord.is_finite() {
        return if coord > 0.0 { i32::MAX } else { i32::MIN };
    }

    // `as` saturates, so huge quotients clamp instead of wrapping.
    let cell = (coord / cell_size).floor() as i32;
    if cell_origin(cell, cell_size) > coord {
        cell.saturating_sub(1)
    } else if cell < i32::MAX && cell_origin(cell + 1, cell_size) <= coord {
        cell + 1
    } else {
        cell
    }
}

/// Inclusive range of cells overlapped by the interval between `a` and `b`,
/// in either order.
pub fn cell_span(a: f32, b: f32, cell_size: f32) -> (i32, i32) {
    (
        floor_to_cell(a.min(b), cell_size),
        floor_to_cell(a.max(b), cell_size),
    )
}
