/// Linear interpolation of `x` between `(x0, y0)` and `(x1, y1)`.
///
/// Returns `None` when the interval has no usable width: `x0 == x1`, or
/// either end is infinite.
pub fn interpolate(x0: f64, x1: f64, y0: f64, y1: f64, x: f64) -> Option<f64> {
    let width = x1 - x0;
    if width == 0.0 || !width.is_finite() {
        return None;
    }

    Some(y0 + (y1 - y0) * ((x - x0) / width))
}
