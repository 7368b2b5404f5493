//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  folio-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  folio-db errors (separate crate)                                   │
//! │  ├── DbError          - Database operation failures                 │
//! │  └── StoreError       - CoreError ∪ DbError for the write paths     │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → StoreError → Caller            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These are the failures the sale-transaction and stock-adjustment flows can
/// surface. Callers pattern-match on the variant; no partial writes ever
/// survive one of these.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced product does not exist.
    ///
    /// Aborts the in-progress transaction; no writes survive.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds current stock for a line item.
    ///
    /// Aborts the entire sale transaction, not just the offending line.
    /// `available` is the stock as of that point in the transaction, so two
    /// lines for the same product compound correctly.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A manual stock adjustment would drive stock negative.
    ///
    /// No writes occur.
    #[error("Adjustment of {delta} would leave {name} with negative stock (current {current})")]
    InvalidAdjustment {
        name: String,
        current: i64,
        delta: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Surfaced before any transaction starts; no writes are attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A sale was submitted with no line items.
    #[error("sale must contain at least one item")]
    EmptyCart,

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., invalid UUID).
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "The Hobbit".to_string(),
            available: 3,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for The Hobbit: available 3, requested 10"
        );

        let err = CoreError::InvalidAdjustment {
            name: "Bookmark".to_string(),
            current: 10,
            delta: -15,
        };
        assert_eq!(
            err.to_string(),
            "Adjustment of -15 would leave Bookmark with negative stock (current 10)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::EmptyCart;
        assert_eq!(err.to_string(), "sale must contain at least one item");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyCart;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
