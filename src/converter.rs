use std::path::Path;

use log::{debug, warn};

use crate::config::ConverterConfig;
use crate::data::interpolate::interpolate;
use crate::data::loader::load_file;
use crate::data::model::{Axis, CorrelationTable};
use crate::data::search::{in_range, locate, scaled_end, Location};
use crate::error::{ConversionError, LoadError};

/// Outcome of a single query.
///
/// `Ok(None)` means the value lies outside the table and no conversion is
/// defined for it.
pub type Conversion = Result<Option<f64>, ConversionError>;

// ---------------------------------------------------------------------------
// KmvConverter – table-backed Kelvin ⇄ milliVolt conversion
// ---------------------------------------------------------------------------

/// Converts between Kelvin and milliVolts using a calibration table.
///
/// The table is loaded once and never modified, so a converter can be shared
/// across threads by reference.
#[derive(Debug, Clone)]
pub struct KmvConverter {
    table: CorrelationTable,
    config: ConverterConfig,
}

impl KmvConverter {
    /// Load the table at `path` with the default configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use kmv_converter::KmvConverter;
    ///
    /// let converter = KmvConverter::from_path("diode.txt")?;
    /// match converter.kelvin_to_millivolt(77.35)? {
    ///     Some(mv) => println!("77.35 K -> {mv} mV"),
    ///     None => println!("77.35 K is outside the table"),
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::with_config(path, &ConverterConfig::default())
    }

    /// Load the table at `path` using `config`.
    pub fn with_config(
        path: impl AsRef<Path>,
        config: &ConverterConfig,
    ) -> Result<Self, LoadError> {
        Self::from_table(load_file(path.as_ref())?, config)
    }

    /// Build a converter around an already loaded table.
    ///
    /// Fails with [`LoadError::Empty`] when the table has no rows and with
    /// [`LoadError::Config`] when `config` does not validate.
    pub fn from_table(
        table: CorrelationTable,
        config: &ConverterConfig,
    ) -> Result<Self, LoadError> {
        if table.is_empty() {
            return Err(LoadError::Empty {
                origin: "table".to_string(),
            });
        }
        config.validate()?;

        Ok(Self {
            table,
            config: *config,
        })
    }

    pub fn table(&self) -> &CorrelationTable {
        &self.table
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Kelvin to milliVolts.
    ///
    /// The stored voltage (exact hit or interpolated) is divided by the
    /// configured voltage scale.
    pub fn kelvin_to_millivolt(&self, kelvin: f64) -> Conversion {
        let scale = self.config.voltage_scale;
        Ok(self.convert(Axis::Kelvin, kelvin, 1.0)?.map(|v| v / scale))
    }

    /// milliVolts to Kelvin.
    ///
    /// The query is divided by the configured voltage scale to match the
    /// stored voltage column before the lookup.
    pub fn millivolt_to_kelvin(&self, millivolt: f64) -> Conversion {
        self.convert(Axis::Voltage, millivolt, self.config.voltage_scale)
    }

    /// `(min, max)` Kelvin accepted by [`kelvin_to_millivolt`](Self::kelvin_to_millivolt).
    pub fn kelvin_range(&self) -> (f64, f64) {
        self.bounds(Axis::Kelvin)
    }

    /// `(min, max)` milliVolts accepted by [`millivolt_to_kelvin`](Self::millivolt_to_kelvin).
    pub fn millivolt_range(&self) -> (f64, f64) {
        let (min, max) = self.bounds(Axis::Voltage);
        let scale = self.config.voltage_scale;
        (min * scale, max * scale)
    }

    fn bounds(&self, axis: Axis) -> (f64, f64) {
        let first = self.table.value(0, axis);
        let last = self.table.value(self.table.len() - 1, axis);
        (first.min(last), first.max(last))
    }

    /// Range check, bracket search and interpolation for `query / scale` on
    /// `axis`, producing the value on the other axis in stored units.
    fn convert(&self, axis: Axis, query: f64, scale: f64) -> Conversion {
        let target = axis.other();
        let value = query / scale;

        if !in_range(&self.table, axis, value) {
            return match scaled_end(&self.table, axis, query, scale) {
                Some(index) => Ok(Some(self.table.value(index, target))),
                None => {
                    debug!("{axis} {query} is outside the table");
                    Ok(None)
                }
            };
        }

        match locate(&self.table, axis, value, self.config.epsilon) {
            Location::Exact(index) => Ok(Some(self.table.value(index, target))),
            Location::Bracket { low, high } => {
                let lo = self.table.rows()[low];
                let hi = self.table.rows()[high];

                interpolate(lo.get(axis), hi.get(axis), lo.get(target), hi.get(target), value)
                    .map(Some)
                    .ok_or_else(|| {
                        warn!("No usable {axis} interval between rows {low} and {high}");
                        ConversionError::DegenerateInterval { axis, low, high }
                    })
            }
        }
    }
}
