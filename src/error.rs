//! Structural errors for report ingestion and classification
//!
//! Numeric degeneracy (zero impressions, unparseable counts) is never an error:
//! it propagates as NaN and the significance test treats it as "not significant".
//! Everything here aborts the run before any output is written.

use thiserror::Error;

/// Errors that abort a pipeline run
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report contains no ad rows")]
    EmptyInput,

    #[error("Report has no header row")]
    MissingHeader,

    #[error("Report header is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Line {line}: missing value for required field '{field}'")]
    MissingField { line: usize, field: String },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
