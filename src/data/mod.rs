/// Data layer: table types, loading, bracket search and interpolation.
///
/// Architecture:
/// ```text
///  .txt / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CorrelationTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ CorrelationTable │  Vec<CorrelationRow>, Kelvin ↑ / volts ↓
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌─────────────┐
///   │  search   │ ──▶ │ interpolate │  range check → bracket → y
///   └──────────┘     └─────────────┘
/// ```

pub mod interpolate;
pub mod loader;
pub mod model;
pub mod search;
