//! # folio-db: Database Layer for Folio POS
//!
//! SQLite storage for the Folio bookstore POS, via sqlx.
//!
//! This crate owns every write path that touches stock: the sale transaction,
//! the manual stock adjustment, and product creation with initial stock. All
//! three follow the same discipline - verify inside a transaction, write the
//! stock value, append a ledger entry - so the movement ledger always replays
//! to the current stock.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and combined store error types
//! - [`repository`] - Repository implementations (product, sale, movement)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_db::{Database, DbConfig};
//! use folio_core::{PaymentMethod, SaleLine};
//!
//! let db = Database::new(DbConfig::new("path/to/folio.db")).await?;
//!
//! let sale = db
//!     .sales()
//!     .process_sale(PaymentMethod::Cash, &items, seller_id)
//!     .await?;
//! println!("receipt #{}", sale.receipt_number);
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult, StoreError, StoreResult};
pub use pool::{Database, DbConfig};

pub use repository::movement::MovementRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
