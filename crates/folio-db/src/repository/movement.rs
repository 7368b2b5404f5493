//! # Stock Movement Repository
//!
//! Reads over the append-only stock ledger, plus the single insert helper
//! every write path shares.
//!
//! ## The Ledger Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Stock Ledger Replay                            │
//! │                                                                     │
//! │  Every change to products.stock appends exactly one movement in     │
//! │  the same transaction:                                              │
//! │                                                                     │
//! │    product created (stock 10)  →  IN  10  "Initial stock"           │
//! │    sale of 3                   →  OUT  3  "Sale #42"                │
//! │    manual restock of 5         →  IN   5  "restock"                 │
//! │    damaged write-off of 2      →  OUT  2  "damaged"                 │
//! │                                                                     │
//! │  Σ signed quantities = 10 - 3 + 5 - 2 = 10 = products.stock         │
//! │                                                                     │
//! │  Movements are never updated or deleted, so the product's history   │
//! │  is reconstructable from zero at any time.                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::DbResult;
use folio_core::StockMovement;

/// Repository for stock-movement reads.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    pool: SqlitePool,
}

/// Appends one ledger entry on the given connection.
///
/// Takes a bare connection so it composes into the sale and adjustment
/// transactions; this is the only INSERT into `stock_movements` in the crate.
pub(crate) async fn insert_movement(
    conn: &mut SqliteConnection,
    movement: &StockMovement,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO stock_movements (
            id, product_id, movement_type, quantity, reason, performed_by, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&movement.id)
    .bind(&movement.product_id)
    .bind(movement.movement_type)
    .bind(movement.quantity)
    .bind(&movement.reason)
    .bind(&movement.performed_by)
    .bind(movement.created_at)
    .execute(conn)
    .await?;

    Ok(())
}

impl MovementRepository {
    /// Creates a new MovementRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MovementRepository { pool }
    }

    /// Full movement history for a product, oldest first.
    pub async fn history(&self, product_id: &str) -> DbResult<Vec<StockMovement>> {
        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT id, product_id, movement_type, quantity, reason, performed_by, created_at
            FROM stock_movements
            WHERE product_id = ?1
            ORDER BY created_at, rowid
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }

    /// Most recent movements across all products (audit view).
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<StockMovement>> {
        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT id, product_id, movement_type, quantity, reason, performed_by, created_at
            FROM stock_movements
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }

    /// Signed sum of all movements for a product.
    ///
    /// Replaying the ledger from zero: IN counts positive, OUT negative.
    /// Must always equal `products.stock` for the same product.
    pub async fn ledger_total(&self, product_id: &str) -> DbResult<i64> {
        let total: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(CASE WHEN movement_type = 'OUT' THEN -quantity ELSE quantity END)
            FROM stock_movements
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(0))
    }
}
