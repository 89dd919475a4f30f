//! Error types for the rebound Markov crate

use std::path::PathBuf;

use thiserror::Error;

use crate::records::RowError;

/// Main error type for the rebound Markov crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cannot read box scores from '{}': {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} malformed row(s) in '{}':\n{}", errors.len(), path.display(), format_row_errors(errors))]
    MalformedRows { path: PathBuf, errors: Vec<RowError> },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid state code '{code}' (expected one of HW, HL, MW, ML, LW, LL)")]
    InvalidStateCode { code: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    /// Wrap an IO error with the operation that failed.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}

fn format_row_errors(errors: &[RowError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
