//! Error types for dataset loading and score classification

use std::path::PathBuf;
use thiserror::Error;

/// The source file could not be turned into records.
///
/// Fatal at startup: nothing can be rendered without data.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Failed to open dataset {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("Dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Line {line}: column '{column}' has invalid value '{value}'")]
    Malformed {
        line: u64,
        column: String,
        value: String,
    },
    #[error("Line {line}: required column '{column}' is empty")]
    MissingField { line: u64, column: String },
}

/// A classifier was handed a value it has no band for.
///
/// The loader rejects out-of-range cells and callers filter missing
/// observations before classifying, so hitting this from loaded data means a
/// caller broke that contract.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ScoreError {
    #[error("Invalid score {score}: expected a finite, non-negative number")]
    Invalid { score: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_names_every_column() {
        let err = DataSourceError::MissingColumns(vec!["year".into(), "v2paimmig_osp".into()]);
        assert_eq!(
            err.to_string(),
            "Dataset is missing required column(s): year, v2paimmig_osp"
        );
    }

    #[test]
    fn test_invalid_score_message() {
        let err = ScoreError::Invalid { score: -1.5 };
        assert!(err.to_string().contains("-1.5"));
    }
}
