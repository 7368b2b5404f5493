//! # Repository Module
//!
//! Database repositories for Folio POS.
//!
//! The repository types abstract SQL behind a typed API; the sale processor
//! and stock flows depend on these, never on raw queries at call sites.
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - catalog CRUD, manual stock adjustment
//! - [`sale::SaleRepository`] - the sale transaction, sale reads
//! - [`movement::MovementRepository`] - stock-ledger reads

pub mod movement;
pub mod product;
pub mod sale;
