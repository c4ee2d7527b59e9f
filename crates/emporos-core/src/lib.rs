//! # emporos-core: Pure Business Logic for Emporos POS
//!
//! This crate is the heart of Emporos POS: the complete sale transaction
//! engine with zero I/O dependencies.
//!
//! ## Components (dependency order, leaves first)
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                  Sale Transaction Engine                         │
//! │                                                                  │
//! │  ledger         pricing          bill              metrics       │
//! │  StockLedger    line math        BillBuilder       SalesSummary  │
//! │  sell/restock   tax/discount     state machine     AdminReport   │
//! │  atomic C&D     eligibility      finalize-once     pure folds    │
//! │                                                                  │
//! │  NO I/O • NO DATABASE • NO NETWORK • DETERMINISTIC               │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Control flow for one sale: the bill builder asks the stock ledger to
//! sell (an atomic check-and-decrement that also freezes the unit price),
//! records an immutable line, and at finalization locks in totals via the
//! pricer and emits an immutable [`Bill`](types::Bill). The aggregator
//! later folds items/bills into metrics.
//!
//! ## Design Principles
//! 1. **Pure functions**: same input, same output; aggregations are
//!    idempotent and never mutate their inputs
//! 2. **No I/O**: persistence lives in `emporos-store`, invoked only at
//!    the edges of a sale
//! 3. **Integer money**: all monetary values are cents (`i64`); rates are
//!    basis points
//! 4. **Explicit errors**: every failure is a typed variant, reported
//!    synchronously, never retried internally
//!
//! ## Example
//! ```rust
//! use emporos_core::bill::{BillBuilder, BillNumberGenerator};
//! use emporos_core::ledger::StockLedger;
//! use emporos_core::pricing::SaleTerms;
//! use emporos_core::types::CatalogItem;
//!
//! let ledger = StockLedger::with_items(vec![
//!     CatalogItem::new("Laptop", "Electronics", "Computers", 100_000, 1),
//!     CatalogItem::new("Mouse", "Electronics", "Accessories", 2_500, 2),
//! ]);
//! let numbers = BillNumberGenerator::new();
//!
//! let mut builder = BillBuilder::new();
//! builder.add_line(&ledger, "Laptop", 1).unwrap();
//! builder.add_line(&ledger, "Mouse", 2).unwrap();
//!
//! let bill = builder
//!     .finalize("alice", "Electronics", &SaleTerms::untaxed(), &numbers)
//!     .unwrap();
//! assert_eq!(bill.total().cents(), 105_000); // $1,050.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::{BillBuilder, BillNumberGenerator, BillPolicy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::StockLedger;
pub use money::{Money, Rate};
pub use pricing::SaleTerms;
pub use types::{Bill, BillLine, CatalogItem, Role, Sector, Supplier, User};
