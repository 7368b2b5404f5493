//! # Product Repository
//!
//! Product catalog operations and the manual stock-adjustment path.
//!
//! ## Stock Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │            The Only Two Writers of products.stock                   │
//! │                                                                     │
//! │  1. SaleRepository::process_sale   (per-line OUT decrements)        │
//! │  2. ProductRepository::adjust_stock (manual IN/OUT adjustment)      │
//! │                                                                     │
//! │  Both follow the same discipline, inside one transaction:           │
//! │                                                                     │
//! │    read stock → verify result >= 0 → write value → append movement  │
//! │                                                                     │
//! │  Never a blind UPDATE ... SET stock = stock - ? outside a           │
//! │  transaction; the re-read inside the transaction is what keeps      │
//! │  concurrent writers correct on hot products.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult, StoreResult};
use crate::repository::movement::insert_movement;
use folio_core::{
    validation, CoreError, MovementType, NewProduct, Product, StockMovement,
};

/// Default reasons when a manual adjustment omits one.
const REASON_ADJUST_IN: &str = "Inbound adjustment";
const REASON_ADJUST_OUT: &str = "Outbound adjustment";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, stock, product_type, low_stock_alert,
                   category_id, brand_id, topic_id, publisher_id, author_id,
                   created_by, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by barcode (checkout scanner lookup).
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, stock, product_type, low_stock_alert,
                   category_id, brand_id, topic_id, publisher_id, author_id,
                   created_by, created_at, updated_at
            FROM products
            WHERE barcode = ?1
            "#,
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Creates a product, recording initial stock in the ledger.
    ///
    /// When `new.stock > 0` an IN movement with reason "Initial stock" is
    /// appended in the same transaction, so the replay invariant holds from
    /// the product's first moment.
    pub async fn create(&self, new: &NewProduct, actor_id: &str) -> StoreResult<Product> {
        validation::validate_product_name(&new.name)?;
        validation::validate_barcode(&new.barcode)?;
        validation::validate_price_cents(new.price_cents)?;
        validation::validate_initial_stock(new.stock)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            barcode: new.barcode.trim().to_string(),
            price_cents: new.price_cents,
            stock: new.stock,
            product_type: new.product_type,
            low_stock_alert: new.low_stock_alert,
            category_id: new.category_id.clone(),
            brand_id: new.brand_id.clone(),
            topic_id: new.topic_id.clone(),
            publisher_id: new.publisher_id.clone(),
            author_id: new.author_id.clone(),
            created_by: Some(actor_id.to_string()),
            created_at: now,
            updated_at: now,
        };

        debug!(barcode = %product.barcode, "Creating product");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, barcode, price_cents, stock, product_type, low_stock_alert,
                category_id, brand_id, topic_id, publisher_id, author_id,
                created_by, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.barcode)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.product_type)
        .bind(product.low_stock_alert)
        .bind(&product.category_id)
        .bind(&product.brand_id)
        .bind(&product.topic_id)
        .bind(&product.publisher_id)
        .bind(&product.author_id)
        .bind(&product.created_by)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        if product.stock > 0 {
            let movement = StockMovement {
                id: Uuid::new_v4().to_string(),
                product_id: product.id.clone(),
                movement_type: MovementType::In,
                quantity: product.stock,
                reason: Some("Initial stock".to_string()),
                performed_by: actor_id.to_string(),
                created_at: now,
            };
            insert_movement(&mut tx, &movement).await?;
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(id = %product.id, stock = product.stock, "Product created");
        Ok(product)
    }

    /// Updates catalog fields of an existing product.
    ///
    /// Deliberately does not touch `stock`: stock only changes through
    /// `adjust_stock` or `process_sale`, which append ledger entries.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                barcode = ?3,
                price_cents = ?4,
                product_type = ?5,
                low_stock_alert = ?6,
                category_id = ?7,
                brand_id = ?8,
                topic_id = ?9,
                publisher_id = ?10,
                author_id = ?11,
                updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.barcode)
        .bind(product.price_cents)
        .bind(product.product_type)
        .bind(product.low_stock_alert)
        .bind(&product.category_id)
        .bind(&product.brand_id)
        .bind(&product.topic_id)
        .bind(&product.publisher_id)
        .bind(&product.author_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Applies a signed manual stock adjustment.
    ///
    /// ## Contract
    /// - `delta` may be positive (restock) or negative (write-off)
    /// - the resulting stock must be >= 0, checked inside the transaction
    /// - one movement is appended: IN for positive delta, OUT for negative,
    ///   quantity = |delta|, with the supplied reason or a direction default
    ///
    /// On failure nothing is written; returns the updated product on success.
    pub async fn adjust_stock(
        &self,
        product_id: &str,
        delta: i64,
        reason: Option<&str>,
        actor_id: &str,
    ) -> StoreResult<Product> {
        validation::validate_adjustment(delta)?;

        debug!(id = %product_id, delta, "Adjusting stock");

        let mut tx = self.pool.begin().await?;

        let mut product = fetch_product(&mut tx, product_id).await?;

        // checked_add: stock near i64::MAX is as invalid as going negative
        let new_stock = match product.stock.checked_add(delta) {
            Some(stock) if stock >= 0 => stock,
            _ => {
                return Err(CoreError::InvalidAdjustment {
                    name: product.name,
                    current: product.stock,
                    delta,
                }
                .into());
            }
        };

        let now = Utc::now();
        write_stock(&mut tx, product_id, new_stock, now).await?;

        let movement_type = if delta > 0 {
            MovementType::In
        } else {
            MovementType::Out
        };
        let default_reason = if delta > 0 {
            REASON_ADJUST_IN
        } else {
            REASON_ADJUST_OUT
        };
        let movement = StockMovement {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            movement_type,
            quantity: delta.abs(),
            reason: Some(reason.unwrap_or(default_reason).to_string()),
            performed_by: actor_id.to_string(),
            created_at: now,
        };
        insert_movement(&mut tx, &movement).await?;

        tx.commit().await.map_err(DbError::from)?;

        product.stock = new_stock;
        product.updated_at = now;

        info!(id = %product_id, delta, new_stock, "Stock adjusted");
        Ok(product)
    }

    /// Lists products at or below a stock threshold with the alert flag set.
    pub async fn low_stock(&self, threshold: i64) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, stock, product_type, low_stock_alert,
                   category_id, brand_id, topic_id, publisher_id, author_id,
                   created_by, created_at, updated_at
            FROM products
            WHERE low_stock_alert = 1 AND stock <= ?1
            ORDER BY stock, name
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts products (for diagnostics and the seeder).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Transaction Helpers (shared with the sale processor)
// =============================================================================

/// Loads a product inside a transaction, or fails with ProductNotFound.
pub(crate) async fn fetch_product(
    conn: &mut SqliteConnection,
    product_id: &str,
) -> Result<Product, crate::error::StoreError> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, barcode, price_cents, stock, product_type, low_stock_alert,
               category_id, brand_id, topic_id, publisher_id, author_id,
               created_by, created_at, updated_at
        FROM products
        WHERE id = ?1
        "#,
    )
    .bind(product_id)
    .fetch_optional(conn)
    .await
    .map_err(DbError::from)?;

    product.ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()).into())
}

/// Writes a verified stock value inside a transaction.
///
/// The value is computed by the caller after its non-negativity check; the
/// CHECK constraint on the column is only a backstop.
pub(crate) async fn write_stock(
    conn: &mut SqliteConnection,
    product_id: &str,
    new_stock: i64,
    now: chrono::DateTime<Utc>,
) -> DbResult<()> {
    sqlx::query("UPDATE products SET stock = ?2, updated_at = ?3 WHERE id = ?1")
        .bind(product_id)
        .bind(new_stock)
        .bind(now)
        .execute(conn)
        .await?;

    Ok(())
}
