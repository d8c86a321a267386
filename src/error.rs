use crate::data::model::Axis;

/// Errors that can occur while loading a correlation table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The source parsed to zero usable rows
    #[error("no usable rows in {origin}")]
    Empty { origin: String },

    /// CSV header without a required column
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    /// File extension not handled by any loader
    #[error("unsupported table format: .{0}")]
    UnsupportedFormat(String),

    /// Converter settings rejected by validation
    #[error("invalid converter configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors a query can resolve to besides a value or "out of range".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// The bracketing rows do not span a finite, non-zero width on the
    /// query axis, so there is nothing to interpolate across.
    #[error("degenerate {axis} interval between rows {low} and {high}")]
    DegenerateInterval { axis: Axis, low: usize, high: usize },
}

/// Errors that can occur while reading converter configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value outside its permitted range
    #[error("invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}
