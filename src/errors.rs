//! Error types for fieldmaster
//!
//! Each error type has a corresponding error code for programmatic handling.
//! Workflow rejections and blocked transitions are not errors; they are
//! reported through return values of the store operations.

use thiserror::Error;

/// Result type alias for fieldmaster operations
pub type Result<T> = std::result::Result<T, FieldError>;

/// Main error type for infrastructure failures
#[derive(Debug, Error)]
pub enum FieldError {
    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Unknown order, master or checklist item referenced by a caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// A command was refused by the workflow (blocked transition or
    /// rejected input); only front ends raise this
    #[error("Rejected: {0}")]
    Rejected(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl FieldError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::InvalidJson(_) => "INVALID_JSON",
            FieldError::FileNotFound(_) => "FILE_NOT_FOUND",
            FieldError::ConfigError(_) => "CONFIG_ERROR",
            FieldError::Storage(_) => "STORAGE_ERROR",
            FieldError::NotFound(_) => "NOT_FOUND",
            FieldError::Rejected(_) => "REJECTED",
            FieldError::Io(_) => "IO_ERROR",
            FieldError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        FieldError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &FieldError) -> i32 {
    match error {
        FieldError::NotFound(_) => 2,
        FieldError::Rejected(_) => 3,
        FieldError::ConfigError(_) => 78, // EX_CONFIG
        _ => 1,
    }
}
