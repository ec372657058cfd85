//! # Error Types
//!
//! Domain-specific error types for kupah-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kupah-core errors (this file)                                         │
//! │  ├── CoreError        - Ledger rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kupah-register errors (separate crate)                                │
//! │  └── RegisterError    - Config / session failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RegisterError → Caller            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check runs before the ledger is touched, so an `Err` never leaves a
//! half-applied cancellation behind.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger errors raised by [`Item`](crate::Item) and
/// [`ItemList`](crate::ItemList) operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product code is not a string of decimal digits.
    #[error("Invalid code '{0}': code must be a string of digits")]
    InvalidCode(String),

    /// Cancellation amount below one or above `MAX_AMOUNT`.
    #[error("Invalid amount {0}: amount must be between 1 and {max}", max = crate::MAX_AMOUNT)]
    InvalidAmount(i64),

    /// `cancel` was called without an index or a code.
    #[error("Expected either code or index")]
    MissingSelector,

    /// The selector resolved to no active line.
    ///
    /// ## When This Occurs
    /// - Index past the end of the ledger
    /// - Index pointing at a canceled line or a cancelation entry
    /// - No active line carries the requested code
    #[error("Item is not in list: {0}")]
    ItemNotFound(String),

    /// The operation does not apply to the selected line.
    ///
    /// ## When This Occurs
    /// - `inc_last` when the last active line is sold by weight
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before a line is built.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
