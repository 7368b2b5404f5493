//! # Sale Repository
//!
//! The sale transaction processor and sale reads.
//!
//! ## The Sale Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    process_sale - one unit of work                  │
//! │                                                                     │
//! │  validate cart (no transaction yet, no writes on failure)           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  BEGIN ─► advance receipt_sequence (UPDATE..RETURNING)              │
//! │       │    └── first statement = write lock acquired up front       │
//! │       ▼                                                             │
//! │  INSERT sale header (total, payment, seller, receipt number)        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  for each line, in submitted order:                                 │
//! │    1. SELECT product          ── missing? ──► ROLLBACK (NotFound)   │
//! │    2. stock >= quantity?      ── no? ───────► ROLLBACK              │
//! │    3. UPDATE stock            (read-verify-write, sees own writes   │
//! │    4. INSERT movement (OUT)    so duplicate-product lines compound) │
//! │    5. INSERT sale item                                              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  COMMIT ─► exactly one sale, one item + one movement + one          │
//! │            decrement per line - or none of the above                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult, StoreResult};
use crate::repository::movement::insert_movement;
use crate::repository::product::{fetch_product, write_stock};
use folio_core::{
    sale_total, validation, CoreError, MovementType, PaymentMethod, Sale, SaleItem, SaleLine,
    StockMovement,
};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Processes a submitted cart as one atomic sale.
    ///
    /// ## Contract
    /// - `items` non-empty, each quantity > 0 and price > 0 (validated
    ///   before the transaction opens)
    /// - total = Σ quantity × price from the caller-supplied snapshot
    ///   prices; the catalog price is never re-read
    /// - lines are processed in submitted order; each line re-checks stock
    ///   against the in-transaction value, so two lines for one product
    ///   compound and either may fail independently
    /// - on any failure the whole transaction rolls back: no sale header,
    ///   no items, no movements, no stock change survive
    ///
    /// Returns the persisted sale including its assigned receipt number.
    pub async fn process_sale(
        &self,
        payment: PaymentMethod,
        items: &[SaleLine],
        seller_id: &str,
    ) -> StoreResult<Sale> {
        validation::validate_sale_lines(items)?;

        let total = sale_total(items);

        debug!(lines = items.len(), total = %total, "Processing sale");

        let mut tx = self.pool.begin().await?;

        // Assigning the receipt number first also promotes this transaction
        // to a write transaction, serializing concurrent sales.
        let receipt_number = next_receipt_number(&mut tx).await?;
        let now = Utc::now();

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            total_cents: total.cents(),
            payment,
            seller_id: seller_id.to_string(),
            receipt_number,
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO sales (id, total_cents, payment, seller_id, receipt_number, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.total_cents)
        .bind(sale.payment)
        .bind(&sale.seller_id)
        .bind(sale.receipt_number)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        for line in items {
            let product = fetch_product(&mut tx, &line.product_id).await?;

            if !product.has_stock_for(line.quantity) {
                return Err(CoreError::InsufficientStock {
                    name: product.name,
                    available: product.stock,
                    requested: line.quantity,
                }
                .into());
            }

            write_stock(&mut tx, &product.id, product.stock - line.quantity, now).await?;

            let movement = StockMovement {
                id: Uuid::new_v4().to_string(),
                product_id: product.id.clone(),
                movement_type: MovementType::Out,
                quantity: line.quantity,
                reason: Some(format!("Sale #{receipt_number}")),
                performed_by: seller_id.to_string(),
                created_at: now,
            };
            insert_movement(&mut tx, &movement).await?;

            sqlx::query(
                r#"
                INSERT INTO sale_items (id, sale_id, product_id, quantity, price_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&sale.id)
            .bind(&product.id)
            .bind(line.quantity)
            .bind(line.price_cents)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            sale_id = %sale.id,
            receipt_number,
            total = %total,
            lines = items.len(),
            "Sale committed"
        );

        Ok(sale)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, total_cents, payment, seller_id, receipt_number, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all items for a sale, in insertion order.
    pub async fn get_items(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, price_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists the most recent sales (history view).
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, total_cents, payment, seller_id, receipt_number, created_at
            FROM sales
            ORDER BY created_at DESC, receipt_number DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

/// Advances the shared receipt counter and returns the new value.
///
/// A single-row UPDATE with RETURNING: unique and strictly increasing under
/// concurrent sale creation because SQLite admits one write transaction at a
/// time. Values are never reused, even hypothetically across sale deletion.
async fn next_receipt_number(conn: &mut SqliteConnection) -> DbResult<i64> {
    let value: i64 =
        sqlx::query_scalar("UPDATE receipt_sequence SET value = value + 1 WHERE id = 1 RETURNING value")
            .fetch_one(conn)
            .await?;

    Ok(value)
}
