//! Error types and exit codes for roibot
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (knowledge base could not be read or written)
//!
//! The matching pipeline itself never fails; these errors come from the
//! edges (configuration, KB emission, the fallback call, the server).

use std::path::PathBuf;

use thiserror::Error;

/// Exit codes for the roibot CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unreadable or unwritable KB (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during roibot operations
#[derive(Error, Debug)]
pub enum RoiError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("knowledge base directory not writable: {path:?}: {reason}")]
    KbWrite { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("fallback request failed: {0}")]
    Fallback(String),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl RoiError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        RoiError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed operation
    pub fn failed(operation: &str, error: impl std::fmt::Display) -> Self {
        RoiError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a KB path that could not be written
    pub fn kb_write(path: impl Into<PathBuf>, error: impl std::fmt::Display) -> Self {
        RoiError::KbWrite {
            path: path.into(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RoiError::UnknownFormat(_)
            | RoiError::UsageError(_)
            | RoiError::InvalidValue { .. }
            | RoiError::Toml(_) => ExitCode::Usage,

            RoiError::KbWrite { .. } => ExitCode::Data,

            RoiError::Io(_)
            | RoiError::Json(_)
            | RoiError::Fallback(_)
            | RoiError::FailedOperation { .. }
            | RoiError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            RoiError::UnknownFormat(_) => "unknown_format",
            RoiError::UsageError(_) => "usage_error",
            RoiError::InvalidValue { .. } => "invalid_value",
            RoiError::KbWrite { .. } => "kb_write",
            RoiError::Io(_) => "io_error",
            RoiError::Json(_) => "json_error",
            RoiError::Toml(_) => "toml_error",
            RoiError::Fallback(_) => "fallback_error",
            RoiError::FailedOperation { .. } => "failed_operation",
            RoiError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for roibot operations
pub type Result<T> = std::result::Result<T, RoiError>;
