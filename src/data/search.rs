use log::debug;

use super::model::{Axis, CorrelationTable};

/// Relative tolerance used for exact table hits.
pub const DEFAULT_EPSILON: f64 = 1e-7;

/// Where a query value sits in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The row whose axis value equals the query within tolerance.
    Exact(usize),
    /// Adjacent rows whose axis values straddle the query.
    Bracket { low: usize, high: usize },
}

/// Relative equality anchored on the table value `x`.
///
/// `|x - y| <= epsilon * |x|`. Argument order matters: at `x == 0.0` the
/// tolerance collapses and only an exact match passes.
pub fn approx_eq(x: f64, y: f64, epsilon: f64) -> bool {
    (x - y).abs() <= epsilon * x.abs()
}

/// Whether `value` lies inside the span of `axis`, bounds included.
///
/// Kelvin is checked as `first <= value <= last`, voltage as
/// `first >= value >= last`. NaN and empty tables are never in range.
pub fn in_range(table: &CorrelationTable, axis: Axis, value: f64) -> bool {
    let Some((first, last)) = table.span(axis) else {
        return false;
    };

    if axis.is_ascending() {
        value >= first && value <= last
    } else {
        value <= first && value >= last
    }
}

/// Index of the first or last row whose `axis` value, multiplied by
/// `scale`, is exactly `query`.
///
/// `query / scale` can round one ulp past a table end even when `query` is
/// that end in caller units. Only exact equality counts, so this never widens
/// the accepted range.
pub fn scaled_end(
    table: &CorrelationTable,
    axis: Axis,
    query: f64,
    scale: f64,
) -> Option<usize> {
    let last = table.len().checked_sub(1)?;
    [0, last]
        .into_iter()
        .find(|&index| table.value(index, axis) * scale == query)
}

/// Binary search for `target` on `axis`.
///
/// `target` must already be in range (see [`in_range`]) and the table must
/// be non-empty. After narrowing to an adjacent pair, the low row is tested
/// for an exact hit before the high row.
pub fn locate(table: &CorrelationTable, axis: Axis, target: f64, epsilon: f64) -> Location {
    let mut low = 0;
    let mut high = table.len().saturating_sub(1);

    while high - low > 1 {
        let mid = low + (high - low) / 2;
        let below_mid = target < table.value(mid, axis);

        if below_mid == axis.is_ascending() {
            high = mid;
        } else {
            low = mid;
        }
    }

    for index in [low, high] {
        if approx_eq(table.value(index, axis), target, epsilon) {
            debug!("{axis} {target} matches row {index}");
            return Location::Exact(index);
        }
    }

    debug!("{axis} {target} bracketed by rows {low}..={high}");
    Location::Bracket { low, high }
}
