use std::path::PathBuf;

/// Failures at the dataset boundary. Filtering and aggregation cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("dataset file '{}' not found or unreadable: {source}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", schema_message(column, *row, reason))]
    InputSchema {
        column: String,
        /// Zero-based data row, `None` for table-level problems.
        row: Option<usize>,
        reason: String,
    },

    #[error("could not parse '{}': {source:#}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

fn schema_message(column: &str, row: Option<usize>, reason: &str) -> String {
    match row {
        Some(row) => format!("column '{column}', row {row}: {reason}"),
        None => format!("column '{column}': {reason}"),
    }
}

impl DashboardError {
    pub fn missing_column(column: &str) -> Self {
        DashboardError::InputSchema {
            column: column.to_string(),
            row: None,
            reason: "required column is missing".to_string(),
        }
    }

    pub fn bad_cell(column: &str, row: usize, reason: impl Into<String>) -> Self {
        DashboardError::InputSchema {
            column: column.to_string(),
            row: Some(row),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
