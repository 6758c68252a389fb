use super::error::ViewError;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Peak detection: rows above a threshold in one column
// ---------------------------------------------------------------------------

/// Resolve the peak column, which must exist and hold numeric data.
fn numeric_column(dataset: &Dataset, column: &str) -> Result<usize, ViewError> {
    let col = dataset
        .column_index(column)
        .ok_or_else(|| ViewError::ColumnNotFound {
            column: column.to_string(),
        })?;
    if !dataset.is_numeric(col) {
        return Err(ViewError::NotNumeric {
            column: column.to_string(),
        });
    }
    Ok(col)
}

/// Return indices of rows whose value in `column` is strictly above `threshold`.
///
/// Null cells never pass.
pub fn indices_above_threshold(
    dataset: &Dataset,
    column: &str,
    threshold: f64,
) -> Result<Vec<usize>, ViewError> {
    let col = numeric_column(dataset, column)?;
    Ok(dataset
        .column_values(col)
        .enumerate()
        .filter(|(_, v)| v.is_some_and(|v| v > threshold))
        .map(|(i, _)| i)
        .collect())
}

/// The peak subset: every column of the rows above `threshold`, in original order.
pub fn filter_above_threshold(
    dataset: &Dataset,
    column: &str,
    threshold: f64,
) -> Result<Dataset, ViewError> {
    let indices = indices_above_threshold(dataset, column, threshold)?;
    Ok(dataset.with_rows(indices))
}

/// Observed `(min, max)` of a numeric column, used as the slider range.
/// `None` when the column has no finite values.
pub fn threshold_range(dataset: &Dataset, column: &str) -> Result<Option<(f64, f64)>, ViewError> {
    let col = numeric_column(dataset, column)?;
    let range = dataset
        .column_values(col)
        .flatten()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });
    Ok(range)
}

/// Initial slider position: `preferred` when it lies inside the observed range,
/// otherwise the midpoint of that range.
pub fn default_threshold(
    dataset: &Dataset,
    column: &str,
    preferred: f64,
) -> Result<f64, ViewError> {
    Ok(match threshold_range(dataset, column)? {
        Some((lo, hi)) if (lo..=hi).contains(&preferred) => preferred,
        Some((lo, hi)) => lo + (hi - lo) / 2.0,
        None => preferred,
    })
}
