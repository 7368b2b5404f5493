//! # folio-core: Pure Business Logic for Folio POS
//!
//! This crate is the heart of the Folio bookstore POS. It contains the domain
//! types and business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Folio POS Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │              Web controllers / React client                   │ │
//! │  │    checkout, stock admin, sales history, reports              │ │
//! │  └────────────────────────────┬──────────────────────────────────┘ │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐ │
//! │  │              ★ folio-core (THIS CRATE) ★                      │ │
//! │  │                                                               │ │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌──────────┐ │ │
//! │  │   │   types   │  │   money   │  │ validation │  │  error   │ │ │
//! │  │   │  Product  │  │   Money   │  │   rules    │  │  typed   │ │ │
//! │  │   │ Sale/Item │  │  cents    │  │   checks   │  │  errors  │ │ │
//! │  │   │ Movement  │  │           │  │            │  │          │ │ │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └──────────┘ │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │ │
//! │  └────────────────────────────┬──────────────────────────────────┘ │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐ │
//! │  │                 folio-db (Database Layer)                     │ │
//! │  │   sale transaction, stock ledger, receipt sequence, SQLite    │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic - same input, same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
