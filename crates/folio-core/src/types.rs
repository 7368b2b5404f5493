//! # Domain Types
//!
//! Core domain types for the Folio POS bookstore backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌──────────────────┐    │
//! │  │    Product     │   │      Sale      │   │  StockMovement   │    │
//! │  │  ────────────  │   │  ────────────  │   │  ──────────────  │    │
//! │  │  id (UUID)     │   │  id (UUID)     │   │  id (UUID)       │    │
//! │  │  barcode       │   │  receipt_number│   │  movement_type   │    │
//! │  │  price_cents   │   │  total_cents   │   │  quantity (mag)  │    │
//! │  │  stock (>= 0)  │   │  payment       │   │  performed_by    │    │
//! │  └────────────────┘   └───────┬────────┘   └──────────────────┘    │
//! │                               │ 1─*                                 │
//! │                       ┌───────┴────────┐                           │
//! │                       │    SaleItem    │  price snapshot at time   │
//! │                       │  quantity,price│  of sale (frozen)         │
//! │                       └────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A sale has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `receipt_number`: short monotonic integer, customer-presentable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Type
// =============================================================================

/// What kind of catalog entry a product is.
///
/// Books carry author/publisher/topic references; everything else carries
/// brand/category references. Stored as TEXT (`BOOK` / `OTHER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Book,
    Other,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid. Stored as TEXT (`CASH` / `CARD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
}

// =============================================================================
// Movement Type
// =============================================================================

/// Direction of a stock movement. The `quantity` on the movement is always a
/// magnitude; this enum carries the sign semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Stock increase (restock, initial stock).
    In,
    /// Stock decrease (sale consumption, outbound adjustment).
    Out,
    /// Reserved correction type; present in the schema, not written by any
    /// current flow (manual adjustments map their sign to In/Out).
    Adjustment,
}

impl MovementType {
    /// Sign multiplier used by the ledger replay sum.
    #[inline]
    pub const fn sign(&self) -> i64 {
        match self {
            MovementType::In | MovementType::Adjustment => 1,
            MovementType::Out => -1,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product (book or general merchandise) with tracked stock.
///
/// Invariant: `stock` never goes negative. Both writers of this field (the
/// sale transaction and the manual adjustment) verify inside their
/// transaction before writing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown at checkout and on receipts.
    pub name: String,

    /// Scannable barcode - unique business identifier.
    pub barcode: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// BOOK or OTHER.
    pub product_type: ProductType,

    /// Whether to surface this product in low-stock reporting.
    pub low_stock_alert: bool,

    /// Catalog references - opaque ids owned by the catalog layer.
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub topic_id: Option<String>,
    pub publisher_id: Option<String>,
    pub author_id: Option<String>,

    /// Actor who created the product, if known.
    pub created_by: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the product can cover a requested quantity.
    #[inline]
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale transaction.
///
/// Immutable once created - there is no update or delete path. The receipt
/// number is drawn from a shared monotonic sequence, independent of `id`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: String,
    /// Sum of line subtotals in cents, from snapshotted prices.
    pub total_cents: i64,
    pub payment: PaymentMethod,
    /// Acting cashier, supplied by the identity layer.
    pub seller_id: String,
    /// Customer-facing sequence number; unique and strictly increasing.
    pub receipt_number: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item belonging to exactly one sale.
///
/// `price_cents` is the point-in-time snapshot captured at submission; later
/// catalog price changes do not retroactively alter historical totals.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    /// Quantity sold. Always > 0.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub price_cents: i64,
}

impl SaleItem {
    /// Line subtotal: quantity × snapshotted unit price.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.price_cents) * self.quantity
    }
}

// =============================================================================
// Stock Movement
// =============================================================================

/// An entry in the append-only stock ledger.
///
/// Every stock-affecting operation (initial stock, manual adjustment, sale
/// consumption) produces exactly one movement, so replaying all movements
/// from zero reproduces the product's current stock.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    pub movement_type: MovementType,
    /// Magnitude of the change. Always >= 0; direction carries the sign.
    pub quantity: i64,
    /// Free-text reason, e.g. "Initial stock", "Sale #42", "damaged".
    pub reason: Option<String>,
    /// Acting user, supplied by the identity layer.
    pub performed_by: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    /// The signed quantity this movement contributes to the replay sum.
    #[inline]
    pub fn signed_quantity(&self) -> i64 {
        self.movement_type.sign() * self.quantity
    }
}

// =============================================================================
// Input DTOs
// =============================================================================

/// One submitted cart line: product, quantity, and the unit price the buyer
/// was shown (snapshot - deliberately not re-fetched at commit time).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
    /// Unit price in cents as displayed to the buyer.
    pub price_cents: i64,
}

impl SaleLine {
    /// Line subtotal from the submitted snapshot price.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.price_cents) * self.quantity
    }
}

/// Computes the sale total from submitted lines.
///
/// Uses the caller-supplied snapshot prices so the receipt total matches what
/// the buyer was shown, even if a catalog price changes concurrently.
pub fn sale_total(items: &[SaleLine]) -> Money {
    items.iter().map(SaleLine::subtotal).sum()
}

/// Input for creating a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub barcode: String,
    pub price_cents: i64,
    /// Initial stock. When > 0 the creation records a matching IN movement.
    pub stock: i64,
    pub product_type: ProductType,
    pub low_stock_alert: bool,
    pub category_id: Option<String>,
    pub brand_id: Option<String>,
    pub topic_id: Option<String>,
    pub publisher_id: Option<String>,
    pub author_id: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, quantity: i64, price_cents: i64) -> SaleLine {
        SaleLine {
            product_id: product_id.to_string(),
            quantity,
            price_cents,
        }
    }

    #[test]
    fn test_sale_total() {
        let items = vec![line("p1", 2, 1000), line("p2", 1, 550)];
        assert_eq!(sale_total(&items).cents(), 2550);
    }

    #[test]
    fn test_sale_total_empty_is_zero() {
        assert!(sale_total(&[]).is_zero());
    }

    #[test]
    fn test_movement_sign() {
        assert_eq!(MovementType::In.sign(), 1);
        assert_eq!(MovementType::Out.sign(), -1);
        assert_eq!(MovementType::Adjustment.sign(), 1);
    }

    #[test]
    fn test_signed_quantity() {
        let movement = StockMovement {
            id: "m1".to_string(),
            product_id: "p1".to_string(),
            movement_type: MovementType::Out,
            quantity: 4,
            reason: None,
            performed_by: "u1".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(movement.signed_quantity(), -4);
    }

    #[test]
    fn test_sale_line_wire_format() {
        let parsed: SaleLine = serde_json::from_str(
            r#"{"productId":"550e8400-e29b-41d4-a716-446655440000","quantity":2,"priceCents":1099}"#,
        )
        .unwrap();
        assert_eq!(parsed.quantity, 2);
        assert_eq!(parsed.price_cents, 1099);

        let json = serde_json::to_string(&parsed).unwrap();
        assert!(json.contains("\"priceCents\":1099"));
    }

    #[test]
    fn test_enums_serialize_uppercase() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Cash).unwrap(), "\"CASH\"");
        assert_eq!(serde_json::to_string(&ProductType::Other).unwrap(), "\"OTHER\"");
        assert_eq!(serde_json::to_string(&MovementType::Out).unwrap(), "\"OUT\"");
    }

    #[test]
    fn test_has_stock_for() {
        let product = Product {
            id: "p1".to_string(),
            name: "The Hobbit".to_string(),
            barcode: "9780000000001".to_string(),
            price_cents: 1500,
            stock: 3,
            product_type: ProductType::Book,
            low_stock_alert: true,
            category_id: None,
            brand_id: None,
            topic_id: None,
            publisher_id: None,
            author_id: None,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(product.has_stock_for(3));
        assert!(!product.has_stock_for(4));
    }
}
