use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Axis – which column of the table a value belongs to
// ---------------------------------------------------------------------------

/// A column of the correlation table.
///
/// The calibration data is stored with Kelvin ascending and voltage
/// descending, so each axis also carries its sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Kelvin,
    Voltage,
}

impl Axis {
    /// Whether values on this axis increase with the row index.
    pub fn is_ascending(self) -> bool {
        matches!(self, Axis::Kelvin)
    }

    /// The axis a conversion from `self` produces.
    pub fn other(self) -> Axis {
        match self {
            Axis::Kelvin => Axis::Voltage,
            Axis::Voltage => Axis::Kelvin,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Kelvin => write!(f, "kelvin"),
            Axis::Voltage => write!(f, "voltage"),
        }
    }
}

// ---------------------------------------------------------------------------
// CorrelationRow – one calibration point
// ---------------------------------------------------------------------------

/// One calibration point of the table.
///
/// `millivolt` holds the voltage column exactly as stored in the source
/// file; the converter applies the unit scale on the way in and out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRow {
    pub kelvin: f64,
    #[serde(alias = "voltage", alias = "volts")]
    pub millivolt: f64,
}

impl CorrelationRow {
    pub fn new(kelvin: f64, millivolt: f64) -> Self {
        Self { kelvin, millivolt }
    }

    /// Value of this row on `axis`.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Kelvin => self.kelvin,
            Axis::Voltage => self.millivolt,
        }
    }
}

// ---------------------------------------------------------------------------
// CorrelationTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded calibration table. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationTable {
    rows: Vec<CorrelationRow>,
}

impl CorrelationTable {
    /// Wrap already parsed rows.
    ///
    /// Kelvin must be ascending and voltage descending. That is checked in
    /// debug builds only. Equal neighbours pass here and surface later as a
    /// degenerate interval.
    pub fn from_rows(rows: Vec<CorrelationRow>) -> Self {
        debug_assert!(
            rows.windows(2).all(|w| w[0].kelvin <= w[1].kelvin),
            "Kelvin column must be in ascending order"
        );
        debug_assert!(
            rows.windows(2).all(|w| w[0].millivolt >= w[1].millivolt),
            "Voltage column must be in descending order"
        );

        Self { rows }
    }

    pub fn rows(&self) -> &[CorrelationRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&CorrelationRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&CorrelationRow> {
        self.rows.last()
    }

    /// Value at `index` on `axis`. Panics if `index` is out of bounds.
    pub fn value(&self, index: usize, axis: Axis) -> f64 {
        self.rows[index].get(axis)
    }

    /// `(first, last)` values of `axis`, in table order.
    pub fn span(&self, axis: Axis) -> Option<(f64, f64)> {
        Some((self.first()?.get(axis), self.last()?.get(axis)))
    }
}
