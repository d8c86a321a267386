//! # kmv-converter
//!
//! Kelvin ⇄ milliVolt conversion backed by a sorted calibration table, such
//! as the response curve of a cryogenic diode sensor.
//!
//! The table is a text file with one calibration point per line:
//!
//! ```text
//! # K      V         dV/dT (mV/K)
//! 1.40     1.69454   -13.1
//! 2.10     1.68512   -15.1
//! 3.50     1.65620   -22.4
//! ```
//!
//! Kelvin must increase down the file and voltage must decrease. Exact table
//! values are found by binary search; anything in between is linearly
//! interpolated. Values outside the table resolve to `Ok(None)`.
//!
//! ```no_run
//! use kmv_converter::KmvConverter;
//!
//! let converter = KmvConverter::from_path("diode.txt")?;
//! let mv = converter.kelvin_to_millivolt(2.0)?;
//! let k = converter.millivolt_to_kelvin(1690.0)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod converter;
pub mod data;
pub mod error;

pub use config::{Config, ConverterConfig};
pub use converter::{Conversion, KmvConverter};
pub use data::model::{Axis, CorrelationRow, CorrelationTable};
pub use error::{ConfigError, ConversionError, LoadError};
