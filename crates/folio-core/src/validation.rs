//! # Validation Module
//!
//! Input validation for Folio POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Web controller (deserialization, shape)                   │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation, before any        │
//! │           transaction is opened (no writes on failure)              │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (NOT NULL, UNIQUE, CHECK, FK constraints)        │
//! │                                                                     │
//! │  Defense in depth: each layer catches different mistakes            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::SaleLine;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Bounds
// =============================================================================
// Generous for a retail counter, but small enough that every total computed
// from validated inputs fits comfortably in i64 cents:
//   MAX_SALE_LINES × MAX_LINE_QUANTITY × MAX_PRICE_CENTS = 5 × 10^17 < i64::MAX

/// Maximum line items in one sale.
pub const MAX_SALE_LINES: usize = 500;

/// Maximum quantity on one line item.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;

/// Maximum price in cents (catalog or snapshot).
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// Maximum initial stock on product creation.
pub const MAX_INITIAL_STOCK: i64 = 1_000_000_000;

/// Maximum magnitude of a manual stock adjustment.
pub const MAX_ADJUSTMENT: i64 = 1_000_000;

// =============================================================================
// Sale Input
// =============================================================================

/// Validates a submitted cart before the sale transaction opens.
///
/// ## Rules
/// - At least one line item, at most [`MAX_SALE_LINES`]
/// - Every quantity in 1..=[`MAX_LINE_QUANTITY`]
/// - Every snapshot price in 1..=[`MAX_PRICE_CENTS`]
/// - Every product id parses as a UUID
///
/// Failures here mean no transaction is started and nothing is written.
pub fn validate_sale_lines(items: &[SaleLine]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    if items.len() > MAX_SALE_LINES {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_SALE_LINES as i64,
        });
    }

    for item in items {
        validate_uuid(&item.product_id)?;
        validate_quantity(item.quantity)?;
        validate_unit_price(item.price_cents)?;
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity (1..=MAX_LINE_QUANTITY).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a snapshot unit price (1..=MAX_PRICE_CENTS).
pub fn validate_unit_price(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a catalog price (0..=MAX_PRICE_CENTS; zero allowed for giveaways).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates initial stock on product creation (0..=MAX_INITIAL_STOCK).
pub fn validate_initial_stock(stock: i64) -> ValidationResult<()> {
    if !(0..=MAX_INITIAL_STOCK).contains(&stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_INITIAL_STOCK,
        });
    }

    Ok(())
}

/// Validates a manual stock adjustment delta.
///
/// Zero is rejected: it would produce a movement that moves nothing. The
/// sign decides IN vs OUT downstream; magnitude is capped at
/// [`MAX_ADJUSTMENT`] so downstream stock math stays inside i64 (the
/// resulting-stock check happens inside the transaction).
pub fn validate_adjustment(delta: i64) -> ValidationResult<()> {
    if delta == 0 {
        return Err(ValidationError::Required {
            field: "adjustment".to_string(),
        });
    }

    if delta < -MAX_ADJUSTMENT || delta > MAX_ADJUSTMENT {
        return Err(ValidationError::OutOfRange {
            field: "adjustment".to_string(),
            min: -MAX_ADJUSTMENT,
            max: MAX_ADJUSTMENT,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name (non-empty, at most 255 chars).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 255 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 255,
        });
    }

    Ok(())
}

/// Validates a barcode (non-empty, at most 100 chars).
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a UUID string.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
