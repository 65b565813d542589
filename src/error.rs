//! Error types for the school report pipeline.

use thiserror::Error;

/// Errors surfaced by the report pipeline. None are recoverable mid-run.
#[derive(Error, Debug)]
pub enum ReportError {
    /// An input table could not be read, parsed, or validated.
    #[error("load error: {0}")]
    Load(String),

    /// A student row names a school that is not in the school table.
    #[error("join error: student '{student}' references unknown school '{school}'")]
    Join { student: String, school: String },

    /// A value fell outside every bucket boundary.
    #[error("bucket error: {dimension} value {value} is outside ({lower}, {upper}]")]
    Bucket {
        dimension: &'static str,
        value: f64,
        lower: f64,
        upper: f64,
    },

    /// I/O error while writing a rendered table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error while writing a rendered table.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReportError>;
