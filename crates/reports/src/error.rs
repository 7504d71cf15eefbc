//! Report error types.

use thiserror::Error;

/// Errors that can occur while building or exporting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A report query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Writing a CSV row failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the CSV buffer failed.
    #[error("CSV flush error: {0}")]
    Flush(#[from] std::io::Error),

    /// The rendered CSV was not valid UTF-8.
    #[error("CSV encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
