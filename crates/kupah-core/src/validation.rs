//! # Validation Module
//!
//! Input validation for ledger lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Scanner / keypad front end                                   │
//! │  └── Basic format checks, immediate cashier feedback                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Item construction (Rust)                                     │
//! │  └── THIS MODULE: code, price and amount rules                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ItemList operations                                          │
//! │  └── Selector / cancellation amount checks                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kupah_core::validation::{validate_code, validate_amount};
//!
//! assert!(validate_code("7290000474021").is_ok());
//! assert!(validate_amount(6).is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_AMOUNT, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - Must contain only ASCII decimal digits, so it always parses as an
///   integer >= 0 (a leading `-` or `+` is rejected)
///
/// ## Example
/// ```rust
/// use kupah_core::validation::validate_code;
///
/// assert!(validate_code("0042").is_ok());
/// assert!(validate_code("-42").is_err());
/// assert!(validate_code("42a").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must be a string of digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price (or price per kilogram) in minor units.
///
/// ## Rules
/// - Zero is allowed (free items); negative prices only appear on
///   cancelation entries, which the ledger builds itself
/// - Must not exceed [`MAX_PRICE`]
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE).contains(&price) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    Ok(())
}

/// Validates a line amount (units, or grams for weighed lines).
///
/// ## Rules
/// - Must be positive
/// - Must not exceed [`MAX_AMOUNT`]
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if amount > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 1,
            max: MAX_AMOUNT,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
