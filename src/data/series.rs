use chrono::NaiveDateTime;
use serde::Serialize;

use super::error::ViewError;
use super::model::Dataset;
use crate::config::ParameterScope;

/// One chart point. Either side may be missing; the renderer decides how to
/// draw the gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: Option<NaiveDateTime>,
    pub value: Option<f64>,
}

/// Project one column onto `(timestamp, value)` pairs, one per row, in row order.
///
/// Rows with a null timestamp are kept. Under [`ParameterScope::AllColumns`]
/// any non-timestamp column is accepted and non-numeric cells become `None`.
pub fn series_for(
    dataset: &Dataset,
    column: &str,
    scope: ParameterScope,
) -> Result<Vec<SeriesPoint>, ViewError> {
    let col = plottable_column(dataset, column, scope)?;

    Ok(dataset
        .column_values(col)
        .enumerate()
        .map(|(row, value)| SeriesPoint {
            timestamp: dataset.timestamp(row),
            value,
        })
        .collect())
}

/// Resolve a column the user may plot under `scope`.
pub fn plottable_column(
    dataset: &Dataset,
    column: &str,
    scope: ParameterScope,
) -> Result<usize, ViewError> {
    let col = dataset
        .column_index(column)
        .filter(|&i| i != dataset.timestamp_index)
        .ok_or_else(|| ViewError::ColumnNotFound {
            column: column.to_string(),
        })?;

    if scope == ParameterScope::NumericOnly && !dataset.is_numeric(col) {
        return Err(ViewError::NotNumeric {
            column: column.to_string(),
        });
    }
    Ok(col)
}

/// Convert a timestamp to the x coordinate used by the charts (seconds since
/// the Unix epoch).
pub fn timestamp_to_x(ts: NaiveDateTime) -> f64 {
    ts.and_utc().timestamp_millis() as f64 / 1000.0
}

/// Points with both coordinates present, ready for a line chart.
pub fn plot_points(series: &[SeriesPoint]) -> Vec<[f64; 2]> {
    series
        .iter()
        .filter_map(|p| Some([timestamp_to_x(p.timestamp?), p.value?]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TimestampPolicy, ViewConfig};
    use crate::data::loader::load_csv_bytes;

    const CSV: &str = "Timestamp,Power (kW),Meter\n\
        2024-01-01T00:00,0.5,A\n\
        oops,0.9,B\n\
        2024-01-01T02:00,,C\n";

    fn dataset() -> Dataset {
        let cfg = ViewConfig {
            timestamp_policy: TimestampPolicy::Lenient,
            ..ViewConfig::default()
        };
        load_csv_bytes(CSV.as_bytes(), &cfg).unwrap()
    }

    #[test]
    fn one_point_per_row_including_null_timestamps() {
        let ds = dataset();
        let series = series_for(&ds, "Power (kW)", ParameterScope::NumericOnly).unwrap();
        assert_eq!(series.len(), ds.len());
        assert!(series[1].timestamp.is_none());
        assert_eq!(series[1].value, Some(0.9));
        assert_eq!(series[2].value, None);
    }

    #[test]
    fn text_column_needs_all_columns_scope() {
        let ds = dataset();
        assert!(matches!(
            series_for(&ds, "Meter", ParameterScope::NumericOnly),
            Err(ViewError::NotNumeric { .. })
        ));
        let series = series_for(&ds, "Meter", ParameterScope::AllColumns).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn timestamp_and_unknown_columns_are_not_plottable() {
        let ds = dataset();
        for col in ["Timestamp", "Energy"] {
            assert!(matches!(
                series_for(&ds, col, ParameterScope::AllColumns),
                Err(ViewError::ColumnNotFound { .. })
            ));
        }
    }

    #[test]
    fn plot_points_drop_gaps() {
        let ds = dataset();
        let series = series_for(&ds, "Power (kW)", ParameterScope::NumericOnly).unwrap();
        let points = plot_points(&series);
        assert_eq!(points, vec![[1_704_067_200.0, 0.5]]);
    }
}
