//! TOML configuration for the converter.
//!
//! ```toml
//! # kmv.toml
//! [converter]
//! voltage_scale = 1000.0
//! epsilon = 1e-7
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::data::search::DEFAULT_EPSILON;
use crate::error::ConfigError;

/// Factor between caller milliVolts and the stored voltage column.
pub const DEFAULT_VOLTAGE_SCALE: f64 = 1000.0;

/// Root of a `kmv.toml` file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub converter: ConverterConfig,
}

/// Tunables of [`KmvConverter`](crate::KmvConverter).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Queries in milliVolts are divided by this before the table lookup,
    /// and table voltages are divided by it on the way out.
    pub voltage_scale: f64,

    /// Relative tolerance for exact table hits.
    pub epsilon: f64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            voltage_scale: DEFAULT_VOLTAGE_SCALE,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl ConverterConfig {
    /// Reject a scale that is zero, negative or non-finite, and an epsilon
    /// that is negative or non-finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.voltage_scale.is_finite() || self.voltage_scale <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "voltage_scale",
                value: self.voltage_scale,
            });
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "epsilon",
                value: self.epsilon,
            });
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.converter.validate()?;
        Ok(config)
    }
}
