//! Failure modes of an analysis run

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// A column is missing or a cell cannot be coerced. `row` is the 1-based
    /// data row (header excluded), `None` for table-level problems.
    #[error("malformed input{}: {field}: {reason}", row_suffix(.row))]
    MalformedInput {
        row: Option<usize>,
        field: String,
        reason: String,
    },

    #[error("no attendance records left after excluding the waiting room")]
    EmptyDataset,

    #[error("cannot build a time grid: {0}")]
    DegenerateRange(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" at row {r}"),
        None => String::new(),
    }
}

impl AnalysisError {
    pub(crate) fn malformed(row: Option<usize>, field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            row,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_row_and_field() {
        let err = AnalysisError::malformed(Some(3), "Duration (Minutes)", "not a number: \"abc\"");
        assert_eq!(
            err.to_string(),
            "malformed input at row 3: Duration (Minutes): not a number: \"abc\""
        );
    }

    #[test]
    fn test_malformed_message_without_row() {
        let err = AnalysisError::malformed(None, "Join Time", "column not found");
        assert_eq!(err.to_string(), "malformed input: Join Time: column not found");
    }
}
