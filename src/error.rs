//! Custom error types for fundview
//!
//! The derivation core never fails: bad numbers coerce to zero and empty
//! inputs produce empty outputs. Errors only arise at the edges, when loading
//! snapshots, reading settings, or writing exports.

use thiserror::Error;

/// The main error type for fundview operations
#[derive(Error, Debug)]
pub enum FundviewError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Invalid command-line or snapshot values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FundviewError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from decoding a snapshot file
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Yaml(_))
    }
}

impl From<std::io::Error> for FundviewError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FundviewError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for FundviewError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for FundviewError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for fundview operations
pub type FundviewResult<T> = Result<T, FundviewError>;
