use meterview::data::filter::filter_above_threshold;
use meterview::data::loader::{load_csv_bytes, load_file};
use meterview::data::series::series_for;
use meterview::data::stats::summary_statistics;
use meterview::{CellValue, ParameterScope, TimestampPolicy, ViewConfig, ViewError};

const METER_CSV: &str = "Timestamp,Power (kW)\n\
    2024-01-01T00:00,0.5\n\
    2024-01-01T01:00,0.9\n\
    2024-01-01T02:00,1.2\n";

const MIXED_CSV: &str = "Timestamp,Power (kW),Voltage (V),Meter,Flag\n\
    2024-01-01 00:00:00,0.42,229.8,M-1,true\n\
    2024-01-01 00:15:00,0.38,230.4,M-1,false\n\
    2024-01-01 00:30:00,,231.0,M-1,true\n\
    2024-01-01 00:45:00,1.75,228.9,M-2,false\n\
    2024-01-01 01:00:00,2.10,229.5,M-2,true\n";

fn lenient() -> ViewConfig {
    ViewConfig {
        timestamp_policy: TimestampPolicy::Lenient,
        ..ViewConfig::default()
    }
}

#[test]
fn row_count_matches_data_lines() {
    let ds = load_csv_bytes(MIXED_CSV.as_bytes(), &ViewConfig::default()).unwrap();
    assert_eq!(ds.len(), MIXED_CSV.lines().count() - 1);
    assert_eq!(ds.columns.len(), 5);
}

#[test]
fn peak_scenario_returns_last_two_rows() {
    let ds = load_csv_bytes(METER_CSV.as_bytes(), &ViewConfig::default()).unwrap();
    let peaks = filter_above_threshold(&ds, "Power (kW)", 0.7).unwrap();
    assert_eq!(peaks.rows, ds.rows[1..].to_vec());
}

#[test]
fn missing_timestamp_scenario() {
    let err = load_csv_bytes(b"A,B\n1,2\n3,4\n", &ViewConfig::default()).unwrap_err();
    assert!(matches!(err, ViewError::MissingTimestampColumn { ref column } if column == "Timestamp"));
    assert!(err.halts_pass());
}

#[test]
fn malformed_timestamp_strict_vs_lenient() {
    let csv = "Timestamp,Power (kW)\n\
        2024-01-01T00:00,0.5\n\
        not-a-date,0.9\n\
        2024-01-01T02:00,1.2\n";

    let err = load_csv_bytes(csv.as_bytes(), &ViewConfig::default()).unwrap_err();
    assert!(matches!(err, ViewError::TimestampParse { row: 2, .. }));

    let ds = load_csv_bytes(csv.as_bytes(), &lenient()).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.get(1, "Timestamp"), Some(&CellValue::Null));
    assert!(ds.timestamp(1).is_none());

    let series = series_for(&ds, "Power (kW)", ParameterScope::NumericOnly).unwrap();
    assert_eq!(series.len(), 3);
    assert!(series[1].timestamp.is_none());
    assert_eq!(series[1].value, Some(0.9));
}

#[test]
fn numeric_columns_exclude_timestamp_and_non_numeric() {
    let ds = load_csv_bytes(MIXED_CSV.as_bytes(), &ViewConfig::default()).unwrap();
    let numeric = ds.numeric_columns();
    assert_eq!(numeric, vec!["Power (kW)", "Voltage (V)"]);
    assert!(!numeric.contains(&"Timestamp".to_string()));
}

#[test]
fn series_preserve_row_order() {
    let ds = load_csv_bytes(MIXED_CSV.as_bytes(), &ViewConfig::default()).unwrap();
    for col in ds.numeric_columns() {
        let series = series_for(&ds, &col, ParameterScope::NumericOnly).unwrap();
        assert_eq!(series.len(), ds.len());
        for (row, point) in series.iter().enumerate() {
            assert_eq!(point.timestamp, ds.timestamp(row));
            assert_eq!(point.value, ds.get(row, &col).and_then(CellValue::as_f64));
        }
    }
}

#[test]
fn statistics_are_ordered_and_bounded() {
    let ds = load_csv_bytes(MIXED_CSV.as_bytes(), &ViewConfig::default()).unwrap();
    let stats = summary_statistics(&ds);
    assert_eq!(stats.len(), 2);

    let (name, power) = &stats[0];
    assert_eq!(name, "Power (kW)");
    assert_eq!(power.count, 4);
    assert_eq!(power.min, 0.38);
    assert_eq!(power.max, 2.10);
    for (_, s) in &stats {
        assert!(s.min <= s.mean && s.mean <= s.max);
        assert!(s.q25 <= s.median && s.median <= s.q75);
    }
}

#[test]
fn threshold_filter_is_monotone_and_strict() {
    let ds = load_csv_bytes(MIXED_CSV.as_bytes(), &ViewConfig::default()).unwrap();
    let mut previous = ds.len();
    for t in [-1.0, 0.0, 0.38, 0.4, 1.0, 1.75, 2.0, 2.1, 5.0] {
        let peaks = filter_above_threshold(&ds, "Power (kW)", t).unwrap();
        assert!(peaks.len() <= previous);
        previous = peaks.len();
        for row in 0..peaks.len() {
            let v = peaks.get(row, "Power (kW)").and_then(CellValue::as_f64).unwrap();
            assert!(v > t);
        }
    }
    assert_eq!(previous, 0);
}

#[test]
fn peak_column_must_exist() {
    let ds = load_csv_bytes(b"Timestamp,Load\n2024-01-01,1\n", &ViewConfig::default()).unwrap();
    let err = filter_above_threshold(&ds, "Power (kW)", 0.7).unwrap_err();
    assert!(err.to_string().contains("please rename"));
}

#[test]
fn loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meter.csv");
    std::fs::write(&path, METER_CSV).unwrap();

    let ds = load_file(&path, &ViewConfig::default()).unwrap();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.numeric_columns(), vec!["Power (kW)"]);
}
