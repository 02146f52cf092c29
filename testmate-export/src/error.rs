//! Export error types.

use thiserror::Error;

/// Errors from export serialization.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The matrix has no data rows to write.
    #[error("Nothing to export: the test-case set produced no rows")]
    EmptySet,

    /// I/O failure while writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
