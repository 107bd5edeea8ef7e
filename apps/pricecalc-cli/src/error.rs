//! # Shell Error Types
//!
//! Two error types live here:
//! - [`ConfigError`]: startup failures (config file unreadable or invalid)
//! - [`ApiError`]: what the user sees when a command is refused
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in pricecalc                              │
//! │                                                                         │
//! │  stdin line "discount 150"                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command parse ── unknown verb ──────────► UNKNOWN_COMMAND      │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Selector parse ── "GBP" ────────────────► INVALID_INPUT        │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Session edit ── OutOfRange ─────────────► VALIDATION_ERROR     │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────► result line            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  A refused command never ends the session.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use pricecalc_core::{CoreError, ValidationError};

// =============================================================================
// Config Error
// =============================================================================

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::state::ConfigState`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parse but do not fit together (e.g. EUR with the tip variant).
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// API Error
// =============================================================================

/// Error reported for a refused command.
///
/// ## Serialization
/// With `--json` this is printed as:
/// ```json
/// { "error": { "code": "VALIDATION_ERROR", "message": "discount must be between 0 and 100" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for refused commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Edit or selection rejected by the session
    ValidationError,

    /// Argument could not be interpreted (unknown currency, mode...)
    InvalidInput,

    /// Command requires an argument that was not given
    MissingArgument,

    /// First word of the line is not a command
    UnknownCommand,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unknown-command error.
    pub fn unknown_command(verb: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command: {} (try 'help')", verb),
        )
    }

    /// Creates a missing-argument error.
    pub fn missing_argument(verb: &str) -> Self {
        ApiError::new(
            ErrorCode::MissingArgument,
            format!("'{}' needs an argument", verb),
        )
    }
}

/// Converts rejected edits to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::from(e),
            other => ApiError::new(ErrorCode::InvalidInput, other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_code() {
        let err: ApiError = ValidationError::Negative {
            field: "amount".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "amount cannot be negative");
    }

    #[test]
    fn test_core_error_maps_to_invalid_input() {
        let err: ApiError = CoreError::UnknownCurrency("GBP".to_string()).into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "Unknown currency: GBP");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::unknown_command("fly");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "UNKNOWN_COMMAND");
        assert_eq!(json["message"], "Unknown command: fly (try 'help')");
    }
}
