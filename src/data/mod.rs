/// Data layer: core types, loading, and the derived views.
///
/// Architecture:
/// ```text
///   uploaded .csv bytes
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, validate Timestamp → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  columns + rows, numeric column set
///   └──────────┘
///        │
///        ├──────────────┬───────────────┐
///        ▼              ▼               ▼
///   ┌─────────┐   ┌─────────┐    ┌──────────┐
///   │ series  │   │  stats  │    │  filter  │  (timestamp, value) pairs,
///   └─────────┘   └─────────┘    └──────────┘  describe(), peak subset
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod series;
pub mod stats;
