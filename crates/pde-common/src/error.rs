//! Error types for PDE

use thiserror::Error;

/// Result type alias for PDE operations
pub type Result<T> = std::result::Result<T, PdeError>;

/// Main error type for PDE
#[derive(Error, Debug)]
pub enum PdeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid pattern for '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("File type not allowed: {0}")]
    UnsupportedFileType(String),

    #[error("Input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    /// A row that cannot be loaded without losing data
    #[error("Malformed input at row {row}: {message}")]
    MalformedInput { row: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<regex::Error> for PdeError {
    fn from(err: regex::Error) -> Self {
        PdeError::InvalidPattern {
            name: String::new(),
            reason: err.to_string(),
        }
    }
}
