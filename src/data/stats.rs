use serde::Serialize;

use super::model::Dataset;

/// Descriptive statistics for one numeric column (the usual `describe()` set).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    /// Non-null values.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Compute statistics over the non-null, finite values. `None` when there are none.
    pub fn compute(values: impl IntoIterator<Item = Option<f64>>) -> Option<Self> {
        let mut vals: Vec<f64> = values.into_iter().flatten().filter(|v| v.is_finite()).collect();
        if vals.is_empty() {
            return None;
        }
        vals.sort_by(f64::total_cmp);

        let count = vals.len();
        let (mean, std) = mean_and_std(&vals);

        Some(ColumnStats {
            count,
            // Summation error can push the mean a hair outside the observed range.
            mean: mean.clamp(vals[0], vals[count - 1]),
            std,
            min: vals[0],
            q25: quantile(&vals, 0.25),
            median: quantile(&vals, 0.5),
            q75: quantile(&vals, 0.75),
            max: vals[count - 1],
        })
    }

    /// Rows of the statistics table: (label, formatted value).
    pub fn table_rows(&self) -> [(&'static str, String); 8] {
        [
            ("count", self.count.to_string()),
            ("mean", format!("{:.4}", self.mean)),
            (
                "std",
                self.std.map_or_else(|| "-".to_string(), |s| format!("{s:.4}")),
            ),
            ("min", format!("{:.4}", self.min)),
            ("25%", format!("{:.4}", self.q25)),
            ("50%", format!("{:.4}", self.median)),
            ("75%", format!("{:.4}", self.q75)),
            ("max", format!("{:.4}", self.max)),
        ]
    }
}

/// Running (Welford) mean and sample standard deviation over sorted, non-empty data.
/// Values are scaled by the largest magnitude so sums cannot overflow.
fn mean_and_std(sorted: &[f64]) -> (f64, Option<f64>) {
    let scale = sorted[0].abs().max(sorted[sorted.len() - 1].abs());
    let scale = if scale > 0.0 { scale } else { 1.0 };

    let (mut mean, mut m2) = (0.0, 0.0);
    for (i, v) in sorted.iter().enumerate() {
        let x = v / scale;
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }
    let std = (sorted.len() > 1).then(|| (m2 / (sorted.len() - 1) as f64).sqrt() * scale);
    (mean * scale, std)
}

/// Linear interpolation between closest ranks over sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Statistics for every numeric column, in header order.
pub fn summary_statistics(dataset: &Dataset) -> Vec<(String, ColumnStats)> {
    (0..dataset.columns.len())
        .filter(|&i| dataset.is_numeric(i))
        .filter_map(|i| {
            let stats = ColumnStats::compute(dataset.column_values(i))?;
            Some((dataset.columns[i].clone(), stats))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::data::loader::load_csv_bytes;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn describe_matches_reference_values() {
        let s = ColumnStats::compute([1.0, 2.0, 3.0, 4.0].map(Some)).unwrap();
        assert_eq!(s.count, 4);
        assert!(close(s.mean, 2.5));
        assert!(close(s.std.unwrap(), 1.290_994_448_735_805_6));
        assert!(close(s.q25, 1.75));
        assert!(close(s.median, 2.5));
        assert!(close(s.q75, 3.25));
        assert_eq!((s.min, s.max), (1.0, 4.0));
    }

    #[test]
    fn nulls_are_not_counted() {
        let s = ColumnStats::compute([Some(5.0), None, Some(7.0)]).unwrap();
        assert_eq!(s.count, 2);
        assert!(close(s.mean, 6.0));
    }

    #[test]
    fn single_value_has_no_std() {
        let s = ColumnStats::compute([Some(3.0)]).unwrap();
        assert_eq!(s.std, None);
        assert_eq!(s.q25, 3.0);
        assert_eq!(s.table_rows()[2].1, "-");
        assert!(ColumnStats::compute([None, None]).is_none());
    }

    #[test]
    fn only_numeric_columns_in_header_order() {
        let csv = "Voltage,Timestamp,Meter,Power (kW)\n\
            230,2024-01-01T00:00,A,0.5\n\
            232,2024-01-01T01:00,B,1.5\n";
        let ds = load_csv_bytes(csv.as_bytes(), &ViewConfig::default()).unwrap();
        let stats = summary_statistics(&ds);
        let names: Vec<&str> = stats.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["Voltage", "Power (kW)"]);
        for (_, s) in &stats {
            assert!(s.min <= s.mean && s.mean <= s.max);
        }
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let s = ColumnStats::compute([Some(1e308), Some(1e308)]).unwrap();
        assert_eq!(s.mean, 1e308);
        assert_eq!(s.std, Some(0.0));

        let s = ColumnStats::compute([Some(1.5e308), Some(1.7e308)]).unwrap();
        assert!(close(s.mean / 1e308, 1.6));
        let std = s.std.unwrap();
        assert!(std.is_finite());
        assert!(close(std / 1e308, 0.2 / 2f64.sqrt()));
    }

    #[test]
    fn infinite_only_column_is_neither_numeric_nor_summarised() {
        let csv = "Timestamp,Spike,kWh\n2024-01-01T00:00,inf,1\n2024-01-01T01:00,-inf,2\n";
        let ds = load_csv_bytes(csv.as_bytes(), &ViewConfig::default()).unwrap();
        assert_eq!(ds.numeric_columns(), vec!["kWh"]);
        let names: Vec<String> = summary_statistics(&ds).into_iter().map(|(c, _)| c).collect();
        assert_eq!(names, ds.numeric_columns());
    }

    #[test]
    fn mean_stays_within_range_for_constant_column() {
        let s = ColumnStats::compute(std::iter::repeat(Some(0.1)).take(10)).unwrap();
        assert!(s.min <= s.mean && s.mean <= s.max);
    }
}
