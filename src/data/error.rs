use thiserror::Error;

/// Failures of the CSV view builder. Each one is shown to the user verbatim.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("the uploaded file is empty")]
    EmptyInput,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV must contain a '{column}' column")]
    MissingTimestampColumn { column: String },

    #[error("row {row}: cannot parse '{value}' as a timestamp")]
    TimestampParse { row: usize, value: String },

    #[error("no numeric columns to plot")]
    NoNumericColumns,

    #[error("column '{column}' not found, please rename the relevant column in your CSV")]
    ColumnNotFound { column: String },

    #[error("column '{column}' does not contain numeric data")]
    NotNumeric { column: String },
}

impl ViewError {
    /// Whether this error invalidates the whole dataset (nothing may be rendered).
    pub fn halts_pass(&self) -> bool {
        matches!(
            self,
            ViewError::EmptyInput
                | ViewError::Csv(_)
                | ViewError::MissingTimestampColumn { .. }
                | ViewError::TimestampParse { .. }
        )
    }
}
