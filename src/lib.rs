//! Core of the energy-meter dashboard: CSV ingestion and the derived views
//! (numeric columns, per-column series, summary statistics, peak subset).
//!
//! Everything here is a pure function of its inputs. The egui front-end in
//! `main.rs` rebuilds these views whenever the user changes something.

pub mod config;
pub mod data;

pub use config::{ParameterScope, TimestampPolicy, ViewConfig};
pub use data::error::ViewError;
pub use data::model::{CellValue, Dataset, Row};
