use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::ViewError;
use super::model::{CellValue, Dataset, Row};
use crate::config::{TimestampPolicy, ViewConfig};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a CSV file on disk.
pub fn load_file(path: &Path, config: &ViewConfig) -> Result<Dataset> {
    let file =
        std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let dataset = load_csv_reader(file, config)
        .with_context(|| format!("loading {}", path.display()))?;
    Ok(dataset)
}

/// Load a dataset from raw uploaded bytes.
pub fn load_csv_bytes(bytes: &[u8], config: &ViewConfig) -> Result<Dataset, ViewError> {
    load_csv_reader(bytes, config)
}

/// CSV layout: one header row, then data rows of equal width.
///
/// The timestamp column named by `config.timestamp_column` must be present.
/// Every other cell is typed by [`infer_cell`].
pub fn load_csv_reader<R: Read>(source: R, config: &ViewConfig) -> Result<Dataset, ViewError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::Fields)
        .from_reader(source);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        return Err(ViewError::EmptyInput);
    }

    let timestamp_index = columns
        .iter()
        .position(|c| *c == config.timestamp_column)
        .ok_or_else(|| ViewError::MissingTimestampColumn {
            column: config.timestamp_column.clone(),
        })?;

    let mut rows = Vec::new();
    let mut coerced_timestamps = 0;

    for result in reader.records() {
        let record = result?;
        let row_no = rows.len() + 1;

        let mut cells = Vec::with_capacity(columns.len());
        for (col_idx, value) in record.iter().enumerate() {
            if col_idx != timestamp_index {
                cells.push(infer_cell(value));
                continue;
            }
            match parse_timestamp(value) {
                Some(ts) => cells.push(CellValue::Timestamp(ts)),
                None => match config.timestamp_policy {
                    TimestampPolicy::Strict => {
                        return Err(ViewError::TimestampParse {
                            row: row_no,
                            value: value.to_string(),
                        });
                    }
                    TimestampPolicy::Lenient => {
                        coerced_timestamps += 1;
                        cells.push(CellValue::Null);
                    }
                },
            }
        }

        rows.push(Row { cells });
    }

    if coerced_timestamps > 0 {
        log::warn!(
            "{coerced_timestamps} of {} '{}' values could not be parsed and were set to null",
            rows.len(),
            config.timestamp_column
        );
    }
    log::debug!("parsed {} rows with columns {:?}", rows.len(), columns);

    Ok(Dataset {
        columns,
        rows,
        timestamp_index,
        coerced_timestamps,
    })
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Type a raw CSV cell: null, integer, float, bool, or text.
pub fn infer_cell(s: &str) -> CellValue {
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("null") {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
    // Day-first only matches when the month-first reading is impossible.
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
];

/// Parse a timestamp cell. Offsets are normalised to UTC.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
