use std::fmt;

use chrono::NaiveDateTime;

use crate::config::ParameterScope;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, inferred from the CSV text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Only ever present in the timestamp column.
    Timestamp(NaiveDateTime),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the cell as an `f64` for plotting and statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Row – one data line of the CSV
// ---------------------------------------------------------------------------

/// One data line. `cells[i]` belongs to `Dataset::columns[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed upload. Immutable once built; a new upload replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Column names in header order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Position of the timestamp column within `columns`.
    pub timestamp_index: usize,
    /// Timestamp cells replaced by `Null` under the lenient policy.
    pub coerced_timestamps: usize,
}

impl Dataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn timestamp_column(&self) -> &str {
        &self.columns[self.timestamp_index]
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (`row`, `column`) by column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.cells.get(col)
    }

    /// Timestamp of a row; `None` for a coerced (null) timestamp.
    pub fn timestamp(&self, row: usize) -> Option<NaiveDateTime> {
        self.rows
            .get(row)?
            .cells
            .get(self.timestamp_index)?
            .as_timestamp()
    }

    /// A column is numeric when every non-null cell is a number and at least
    /// one of them is finite. The timestamp column never qualifies.
    pub fn is_numeric(&self, col: usize) -> bool {
        if col == self.timestamp_index || col >= self.columns.len() {
            return false;
        }
        let mut seen_number = false;
        for row in &self.rows {
            match &row.cells[col] {
                CellValue::Null => {}
                CellValue::Integer(_) => seen_number = true,
                CellValue::Float(v) => seen_number |= v.is_finite(),
                _ => return false,
            }
        }
        seen_number
    }

    /// Non-timestamp columns whose values are all numeric, in header order.
    pub fn numeric_columns(&self) -> Vec<String> {
        (0..self.columns.len())
            .filter(|&i| self.is_numeric(i))
            .map(|i| self.columns[i].clone())
            .collect()
    }

    /// Columns offered to the user as the plotted parameter.
    pub fn parameter_columns(&self, scope: ParameterScope) -> Vec<String> {
        match scope {
            ParameterScope::NumericOnly => self.numeric_columns(),
            ParameterScope::AllColumns => self
                .columns
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != self.timestamp_index)
                .map(|(_, c)| c.clone())
                .collect(),
        }
    }

    /// Numeric values of one column in row order (`None` for non-numeric cells).
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.rows.iter().map(move |r| r.cells.get(col).and_then(CellValue::as_f64))
    }

    /// A new dataset with the same columns holding only the given rows.
    pub fn with_rows(&self, indices: impl IntoIterator<Item = usize>) -> Dataset {
        let rows: Vec<Row> = indices
            .into_iter()
            .filter_map(|i| self.rows.get(i).cloned())
            .collect();
        let coerced_timestamps = rows
            .iter()
            .filter(|r| r.cells[self.timestamp_index].is_null())
            .count();
        Dataset {
            columns: self.columns.clone(),
            rows,
            timestamp_index: self.timestamp_index,
            coerced_timestamps,
        }
    }

    /// First `n` rows, for the preview table.
    pub fn head(&self, n: usize) -> Dataset {
        self.with_rows(0..n.min(self.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> CellValue {
        CellValue::Timestamp(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap())
    }

    fn sample() -> Dataset {
        Dataset {
            columns: vec![
                "Meter".to_string(),
                "Timestamp".to_string(),
                "Power (kW)".to_string(),
                "Voltage".to_string(),
                "Empty".to_string(),
            ],
            rows: vec![
                Row {
                    cells: vec![
                        CellValue::Text("A".into()),
                        ts("2024-01-01 00:00"),
                        CellValue::Float(0.5),
                        CellValue::Integer(230),
                        CellValue::Null,
                    ],
                },
                Row {
                    cells: vec![
                        CellValue::Text("B".into()),
                        CellValue::Null,
                        CellValue::Null,
                        CellValue::Integer(231),
                        CellValue::Null,
                    ],
                },
            ],
            timestamp_index: 1,
            coerced_timestamps: 1,
        }
    }

    #[test]
    fn numeric_columns_skip_text_timestamp_and_all_null() {
        let ds = sample();
        assert_eq!(ds.numeric_columns(), vec!["Power (kW)", "Voltage"]);
    }

    #[test]
    fn all_columns_scope_lists_everything_but_timestamp() {
        let ds = sample();
        assert_eq!(
            ds.parameter_columns(ParameterScope::AllColumns),
            vec!["Meter", "Power (kW)", "Voltage", "Empty"]
        );
    }

    #[test]
    fn head_and_with_rows_keep_columns() {
        let ds = sample();
        let head = ds.head(1);
        assert_eq!(head.len(), 1);
        assert_eq!(head.columns, ds.columns);
        assert_eq!(head.coerced_timestamps, 0);

        let second = ds.with_rows([1]);
        assert_eq!(second.get(0, "Meter"), Some(&CellValue::Text("B".into())));
        assert_eq!(second.coerced_timestamps, 1);
        assert_eq!(ds.head(10).len(), 2);
    }

    #[test]
    fn null_timestamp_reads_as_none() {
        let ds = sample();
        assert!(ds.timestamp(0).is_some());
        assert!(ds.timestamp(1).is_none());
        assert_eq!(ds.timestamp_column(), "Timestamp");
    }
}
