//! Integration tests for the sale transaction processor.
//!
//! Each test runs against a fresh in-memory SQLite database with migrations
//! applied, going through the same repositories the application uses.

use folio_core::{
    CoreError, MovementType, NewProduct, PaymentMethod, ProductType, SaleLine, ValidationError,
};
use folio_db::{Database, DbConfig, StoreError};

const CASHIER: &str = "11111111-1111-1111-1111-111111111111";

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// Inserts a product with the given stock and returns it.
async fn seed_product(db: &Database, name: &str, barcode: &str, price_cents: i64, stock: i64) -> folio_core::Product {
    let new = NewProduct {
        name: name.to_string(),
        barcode: barcode.to_string(),
        price_cents,
        stock,
        product_type: ProductType::Book,
        low_stock_alert: true,
        category_id: None,
        brand_id: None,
        topic_id: None,
        publisher_id: None,
        author_id: None,
    };
    db.products().create(&new, CASHIER).await.unwrap()
}

fn line(product_id: &str, quantity: i64, price_cents: i64) -> SaleLine {
    SaleLine {
        product_id: product_id.to_string(),
        quantity,
        price_cents,
    }
}

async fn sale_count(db: &Database) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM sales")
        .fetch_one(db.pool())
        .await
        .unwrap()
}

async fn out_movement_count(db: &Database, product_id: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM stock_movements WHERE product_id = ?1 AND movement_type = 'OUT'")
        .bind(product_id)
        .fetch_one(db.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn sale_depletes_stock_and_appends_ledger() {
    let db = test_db().await;
    let p1 = seed_product(&db, "The Hobbit", "b-1", 1000, 5).await;

    let sale = db
        .sales()
        .process_sale(PaymentMethod::Cash, &[line(&p1.id, 2, 1000)], CASHIER)
        .await
        .unwrap();

    assert_eq!(sale.total_cents, 2000);
    assert_eq!(sale.payment, PaymentMethod::Cash);
    assert_eq!(sale.seller_id, CASHIER);

    let after = db.products().get_by_id(&p1.id).await.unwrap().unwrap();
    assert_eq!(after.stock, 3);

    let history = db.movements().history(&p1.id).await.unwrap();
    // Initial IN movement from creation plus one OUT from the sale
    assert_eq!(history.len(), 2);
    let out = &history[1];
    assert_eq!(out.movement_type, MovementType::Out);
    assert_eq!(out.quantity, 2);
    assert_eq!(out.performed_by, CASHIER);
    assert_eq!(
        out.reason.as_deref(),
        Some(format!("Sale #{}", sale.receipt_number).as_str())
    );

    let items = db.sales().get_items(&sale.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].price_cents, 1000);
}

#[tokio::test]
async fn insufficient_stock_leaves_no_trace() {
    let db = test_db().await;
    let p1 = seed_product(&db, "The Hobbit", "b-1", 1000, 3).await;

    let err = db
        .sales()
        .process_sale(PaymentMethod::Cash, &[line(&p1.id, 10, 1000)], CASHIER)
        .await
        .unwrap_err();

    match err {
        StoreError::Core(CoreError::InsufficientStock {
            name,
            available,
            requested,
        }) => {
            assert_eq!(name, "The Hobbit");
            assert_eq!(available, 3);
            assert_eq!(requested, 10);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    let after = db.products().get_by_id(&p1.id).await.unwrap().unwrap();
    assert_eq!(after.stock, 3);
    assert_eq!(sale_count(&db).await, 0);
    assert_eq!(out_movement_count(&db, &p1.id).await, 0);
}

#[tokio::test]
async fn duplicate_product_lines_compound_sequentially() {
    let db = test_db().await;
    let p1 = seed_product(&db, "The Hobbit", "b-1", 1000, 3).await;

    // First line consumes 2 of 3 inside the transaction; the second needs 2
    // but only 1 remains, so the whole transaction rolls back.
    let err = db
        .sales()
        .process_sale(
            PaymentMethod::Card,
            &[line(&p1.id, 2, 1000), line(&p1.id, 2, 1000)],
            CASHIER,
        )
        .await
        .unwrap_err();

    match err {
        StoreError::Core(CoreError::InsufficientStock {
            available,
            requested,
            ..
        }) => {
            assert_eq!(available, 1);
            assert_eq!(requested, 2);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    let after = db.products().get_by_id(&p1.id).await.unwrap().unwrap();
    assert_eq!(after.stock, 3);
    assert_eq!(sale_count(&db).await, 0);
    assert_eq!(out_movement_count(&db, &p1.id).await, 0);
}

#[tokio::test]
async fn missing_product_aborts_whole_sale() {
    let db = test_db().await;
    let p1 = seed_product(&db, "The Hobbit", "b-1", 1000, 5).await;
    let ghost = "22222222-2222-2222-2222-222222222222";

    // First line is valid and gets written mid-transaction; the missing
    // product on the second line must roll it back too.
    let err = db
        .sales()
        .process_sale(
            PaymentMethod::Cash,
            &[line(&p1.id, 1, 1000), line(ghost, 1, 500)],
            CASHIER,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Core(CoreError::ProductNotFound(id)) if id == ghost
    ));

    let after = db.products().get_by_id(&p1.id).await.unwrap().unwrap();
    assert_eq!(after.stock, 5);
    assert_eq!(sale_count(&db).await, 0);
    assert_eq!(out_movement_count(&db, &p1.id).await, 0);
}

#[tokio::test]
async fn empty_cart_is_rejected_before_any_write() {
    let db = test_db().await;

    let err = db
        .sales()
        .process_sale(PaymentMethod::Cash, &[], CASHIER)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Core(CoreError::Validation(ValidationError::EmptyCart))
    ));
    assert_eq!(sale_count(&db).await, 0);
}

#[tokio::test]
async fn nonpositive_quantity_and_price_are_rejected() {
    let db = test_db().await;
    let p1 = seed_product(&db, "The Hobbit", "b-1", 1000, 5).await;

    for bad in [line(&p1.id, 0, 1000), line(&p1.id, -1, 1000), line(&p1.id, 1, 0), line(&p1.id, 1, -5)] {
        let err = db
            .sales()
            .process_sale(PaymentMethod::Cash, &[bad], CASHIER)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(_))
        ));
    }

    let after = db.products().get_by_id(&p1.id).await.unwrap().unwrap();
    assert_eq!(after.stock, 5);
}

#[tokio::test]
async fn overflowing_quantity_is_rejected_before_any_write() {
    let db = test_db().await;
    let p1 = seed_product(&db, "The Hobbit", "b-1", 1000, 5).await;

    // quantity × price here would wrap an i64 if it ever reached the
    // total computation; validation must stop it first
    let err = db
        .sales()
        .process_sale(
            PaymentMethod::Cash,
            &[line(&p1.id, i64::MAX / 2 + 1, 2)],
            CASHIER,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::Core(CoreError::Validation(ValidationError::OutOfRange { .. }))
    ));

    let after = db.products().get_by_id(&p1.id).await.unwrap().unwrap();
    assert_eq!(after.stock, 5);
    assert_eq!(sale_count(&db).await, 0);
}

#[tokio::test]
async fn total_uses_snapshot_prices_not_catalog() {
    let db = test_db().await;
    // Catalog price 1500, but the buyer was shown 1200
    let p1 = seed_product(&db, "The Hobbit", "b-1", 1500, 5).await;

    let sale = db
        .sales()
        .process_sale(PaymentMethod::Card, &[line(&p1.id, 2, 1200)], CASHIER)
        .await
        .unwrap();

    assert_eq!(sale.total_cents, 2400);

    let items = db.sales().get_items(&sale.id).await.unwrap();
    assert_eq!(items[0].price_cents, 1200);
    assert_eq!(
        sale.total_cents,
        items.iter().map(|i| i.subtotal().cents()).sum::<i64>()
    );
}

#[tokio::test]
async fn receipt_numbers_are_consecutive_and_survive_failed_attempts() {
    let db = test_db().await;
    let p1 = seed_product(&db, "The Hobbit", "b-1", 1000, 10).await;

    let first = db
        .sales()
        .process_sale(PaymentMethod::Cash, &[line(&p1.id, 1, 1000)], CASHIER)
        .await
        .unwrap();

    // A failed sale rolls back its counter advance along with everything else
    let _ = db
        .sales()
        .process_sale(PaymentMethod::Cash, &[line(&p1.id, 999, 1000)], CASHIER)
        .await
        .unwrap_err();

    let second = db
        .sales()
        .process_sale(PaymentMethod::Card, &[line(&p1.id, 1, 1000)], CASHIER)
        .await
        .unwrap();

    assert_eq!(first.receipt_number, 1);
    assert_eq!(second.receipt_number, 2);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn sale_round_trips_through_reads() {
    let db = test_db().await;
    let p1 = seed_product(&db, "The Hobbit", "b-1", 1000, 10).await;
    let p2 = seed_product(&db, "Bookmark", "b-2", 350, 20).await;

    let sale = db
        .sales()
        .process_sale(
            PaymentMethod::Card,
            &[line(&p1.id, 1, 1000), line(&p2.id, 3, 350)],
            CASHIER,
        )
        .await
        .unwrap();

    let fetched = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
    assert_eq!(fetched.total_cents, 2050);
    assert_eq!(fetched.payment, PaymentMethod::Card);
    assert_eq!(fetched.receipt_number, sale.receipt_number);

    let recent = db.sales().list_recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, sale.id);

    let items = db.sales().get_items(&sale.id).await.unwrap();
    assert_eq!(items.len(), 2);
    // Items come back in submitted order
    assert_eq!(items[0].product_id, p1.id);
    assert_eq!(items[1].product_id, p2.id);
}
