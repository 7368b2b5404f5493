//! # Seed Data Generator
//!
//! Populates the database with a small bookstore catalog for development,
//! plus one demo sale so the history and ledger views have content.
//!
//! ## Usage
//! ```bash
//! cargo run -p folio-db --bin seed
//! cargo run -p folio-db --bin seed -- --db ./data/folio.db
//! ```

use std::env;

use folio_core::{NewProduct, PaymentMethod, ProductType, SaleLine};
use folio_db::{Database, DbConfig};

/// Seeded actor id standing in for the identity layer.
const SEED_ACTOR: &str = "00000000-0000-0000-0000-000000000001";

/// (name, barcode, price_cents, stock, type)
const CATALOG: &[(&str, &str, i64, i64, ProductType)] = &[
    ("The Hobbit", "9780261103344", 1499, 12, ProductType::Book),
    ("The Name of the Wind", "9780756404741", 1899, 8, ProductType::Book),
    ("A Wizard of Earthsea", "9780547773742", 1250, 6, ProductType::Book),
    ("Invisible Cities", "9780156453806", 1380, 4, ProductType::Book),
    ("The Left Hand of Darkness", "9780441478125", 1150, 9, ProductType::Book),
    ("Leather Bookmark", "7501001234501", 350, 40, ProductType::Other),
    ("Reading Lamp", "7501001234518", 2890, 5, ProductType::Other),
    ("Canvas Tote Bag", "7501001234525", 990, 15, ProductType::Other),
    ("Fountain Pen", "7501001234532", 1750, 10, ProductType::Other),
    ("Gift Wrap Sheet", "7501001234549", 150, 60, ProductType::Other),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./folio_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Folio POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./folio_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Folio POS Seed Data Generator");
    println!("=============================");
    println!("Database: {db_path}");
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {existing} products");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!("Seeding catalog...");
    let mut first_book = None;
    let mut first_other = None;

    for (name, barcode, price_cents, stock, product_type) in CATALOG {
        let new = NewProduct {
            name: (*name).to_string(),
            barcode: (*barcode).to_string(),
            price_cents: *price_cents,
            stock: *stock,
            product_type: *product_type,
            low_stock_alert: true,
            category_id: None,
            brand_id: None,
            topic_id: None,
            publisher_id: None,
            author_id: None,
        };

        let product = db.products().create(&new, SEED_ACTOR).await?;
        println!("  + {} (stock {})", product.name, product.stock);

        match product.product_type {
            ProductType::Book if first_book.is_none() => first_book = Some(product),
            ProductType::Other if first_other.is_none() => first_other = Some(product),
            _ => {}
        }
    }

    // One demo sale so history/ledger views aren't empty
    if let (Some(book), Some(other)) = (first_book, first_other) {
        let items = vec![
            SaleLine {
                product_id: book.id.clone(),
                quantity: 1,
                price_cents: book.price_cents,
            },
            SaleLine {
                product_id: other.id.clone(),
                quantity: 2,
                price_cents: other.price_cents,
            },
        ];

        let sale = db
            .sales()
            .process_sale(PaymentMethod::Cash, &items, SEED_ACTOR)
            .await?;
        println!();
        println!(
            "✓ Demo sale: receipt #{} total {}",
            sale.receipt_number,
            sale.total()
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
