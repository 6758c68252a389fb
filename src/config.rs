use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// What to do with a timestamp cell that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Reject the whole file on the first bad value.
    #[default]
    Strict,
    /// Replace bad values with a null marker and keep loading.
    Lenient,
}

/// Which columns the user may pick as the plotted parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterScope {
    #[default]
    NumericOnly,
    /// Every column except the timestamp; non-numeric cells plot as gaps.
    AllColumns,
}

// ---------------------------------------------------------------------------
// ViewConfig
// ---------------------------------------------------------------------------

/// Explicit configuration handed to the loader and to every rendering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Exact (case-sensitive) name of the timestamp column.
    pub timestamp_column: String,
    pub timestamp_policy: TimestampPolicy,
    pub parameter_scope: ParameterScope,
    /// Column scanned by the peak-detection view.
    pub peak_column: String,
    /// Preferred initial threshold; replaced by a range-derived value when it
    /// falls outside the column's observed values.
    pub default_threshold: f64,
    /// Rows shown in the data preview table.
    pub preview_rows: usize,
    /// Directory that receives exported chart images.
    pub export_dir: PathBuf,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            timestamp_column: "Timestamp".to_string(),
            timestamp_policy: TimestampPolicy::Strict,
            parameter_scope: ParameterScope::NumericOnly,
            peak_column: "Power (kW)".to_string(),
            default_threshold: 0.7,
            preview_rows: 5,
            export_dir: PathBuf::from("."),
        }
    }
}

impl ViewConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
