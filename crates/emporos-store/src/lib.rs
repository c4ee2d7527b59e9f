//! # emporos-store: Flat-File Persistence for Emporos POS
//!
//! The persistence collaborator of the sale transaction engine. Three
//! stores, all JSON on disk:
//!
//! - [`CatalogStore`] - the item catalog (load/save inventory, sector and
//!   category filters)
//! - [`BillStore`] - finalized bills, one file per calendar day
//! - [`EmployeeStore`] - the employee directory and credential matching
//!
//! ## Where This Sits in a Sale
//! ```text
//! load_inventory ──► StockLedger ──► BillBuilder ──► finalize
//!                                                       │
//!                       save_inventory ◄── snapshot ◄───┤
//!                       save_bill      ◄── Bill     ◄───┘
//! ```
//! I/O happens only at the edges: before a sale begins and after a
//! finalization succeeds. The engine itself never blocks on a file.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bills;
pub mod catalog;
pub mod employees;
pub mod error;

mod file;

// =============================================================================
// Re-exports
// =============================================================================

pub use bills::BillStore;
pub use catalog::CatalogStore;
pub use employees::EmployeeStore;
pub use error::{StoreError, StoreResult};

// =============================================================================
// Integration Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use emporos_core::bill::{BillBuilder, BillNumberGenerator};
    use emporos_core::ledger::StockLedger;
    use emporos_core::metrics;
    use emporos_core::pricing::SaleTerms;
    use emporos_core::types::CatalogItem;
    use uuid::Uuid;

    /// End-to-end sale: load inventory, sell through the ledger, finalize,
    /// persist both sides, and reconcile the reloaded records.
    #[tokio::test]
    async fn test_full_sale_round_trip() {
        let base = std::env::temp_dir().join(format!("emporos-e2e-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&base).await.unwrap();

        let catalog = CatalogStore::new(base.join("inventory.json"));
        let bills = BillStore::new(base.join("bills"));

        catalog
            .save_inventory(&[
                CatalogItem::new("Laptop", "Electronics", "Computers", 100_000, 1),
                CatalogItem::new("Mouse", "Electronics", "Accessories", 2_500, 2),
            ])
            .await
            .unwrap();

        // Checkout.
        let ledger = StockLedger::with_items(catalog.load_inventory().await.unwrap());
        let numbers = BillNumberGenerator::new();
        let mut builder = BillBuilder::new();
        builder.add_line(&ledger, "Laptop", 1).unwrap();
        builder.add_line(&ledger, "Mouse", 2).unwrap();
        let bill = builder
            .finalize("alice", "Electronics", &SaleTerms::untaxed(), &numbers)
            .unwrap();

        // Persist both sides of the transaction.
        catalog.save_inventory(&ledger.snapshot()).await.unwrap();
        bills.save_bill(&bill).await.unwrap();

        // The reloaded inventory reflects the deduction.
        let reloaded = catalog.load_inventory().await.unwrap();
        let laptop = reloaded.iter().find(|i| i.name == "Laptop").unwrap();
        assert_eq!(laptop.stock_quantity(), 0);
        assert_eq!(laptop.items_sold(), 1);

        // The reloaded bill reconciles, and metrics derived from the two
        // persisted records agree with each other.
        let day = bills.load_bills_for_day(bill.sale_date()).await.unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].total().cents(), 105_000);

        let summary = metrics::sales_summary(&reloaded);
        assert_eq!(summary.total_revenue.cents(), 105_000);
        assert_eq!(summary.total_items_sold, 3);

        let daily = metrics::cashier_daily_total(&day, bill.sale_date());
        assert_eq!(daily.cents(), 105_000);
    }
}
