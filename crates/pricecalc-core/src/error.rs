//! # Error Types
//!
//! Domain-specific error types for pricecalc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricecalc-core errors (this file)                                     │
//! │  ├── CoreError        - Unknown selector values (currency, mode...)    │
//! │  └── ValidationError  - Rejected edits                                 │
//! │                                                                         │
//! │  shell errors (apps/pricecalc-cli)                                     │
//! │  ├── ConfigError      - Config file failures                           │
//! │  └── ApiError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note
//! Calculation itself never fails. A `ValidationError` only tells the caller
//! that an edit was discarded and the previous value is still in place.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised when textual selectors cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Currency code is not one of CLP, USD, EUR.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Mode is neither `discount` nor `tip`.
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    /// Variant is not `discount`, `tip` or `combined`.
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    /// Number locale is not supported.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    /// Edit policy is neither `strict` nor `lenient`.
    #[error("Unknown edit policy: {0}")]
    UnknownPolicy(String),

    /// Field name does not match any input field.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Reasons an edit is rejected under the strict policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be below zero.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Value is below a lower bound.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: i64 },

    /// Text is not a number.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Input field the calculator variant does not show.
    #[error("{field} is not available here (available: {available:?})")]
    Unavailable { field: String, available: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
