//! # Bill Store
//!
//! Flat-file persistence for finalized bills, one JSON file per calendar
//! day (`bills-YYYYMMDD.json`).
//!
//! The store persists exactly what the assembler produced; it never
//! recomputes a total. Daily reporting (`cashier_daily_total`,
//! `admin_report`) reads a day's file back and folds it in the core.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use emporos_core::types::Bill;

use crate::error::{StoreError, StoreResult};
use crate::file;

/// JSON-backed bill store over a directory of per-day files.
#[derive(Debug, Clone)]
pub struct BillStore {
    dir: PathBuf,
}

impl BillStore {
    /// Creates a store over the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        BillStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Appends a finalized bill to its sale day's file.
    pub async fn save_bill(&self, bill: &Bill) -> StoreResult<()> {
        self.ensure_dir().await?;

        let path = self.day_file(bill.sale_date());
        let mut bills: Vec<Bill> = file::read_json_or_default(&path).await?;
        bills.push(bill.clone());
        file::write_json(&path, &bills).await?;

        info!(
            bill_number = %bill.bill_number(),
            cashier = %bill.cashier(),
            sector = %bill.sector(),
            total = %bill.total(),
            "Bill saved"
        );
        Ok(())
    }

    /// Loads every bill recorded on the given day. A missing day file
    /// reads as no bills.
    pub async fn load_bills_for_day(&self, date: DateTime<Utc>) -> StoreResult<Vec<Bill>> {
        let path = self.day_file(date);
        let bills: Vec<Bill> = file::read_json_or_default(&path).await?;
        debug!(path = %path.display(), count = bills.len(), "Loaded daily bills");
        Ok(bills)
    }

    /// Loads one bill by number, searching the given day's file.
    pub async fn find_bill(&self, date: DateTime<Utc>, bill_number: &str) -> StoreResult<Bill> {
        let bills = self.load_bills_for_day(date).await?;
        bills
            .into_iter()
            .find(|b| b.bill_number() == bill_number)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Bill".to_string(),
                key: bill_number.to_string(),
            })
    }

    fn day_file(&self, date: DateTime<Utc>) -> PathBuf {
        self.dir.join(format!("bills-{}.json", date.format("%Y%m%d")))
    }

    async fn ensure_dir(&self) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| StoreError::io(&self.dir, err))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use emporos_core::bill::{BillBuilder, BillNumberGenerator};
    use emporos_core::ledger::StockLedger;
    use emporos_core::pricing::SaleTerms;
    use emporos_core::types::CatalogItem;
    use uuid::Uuid;

    fn temp_store() -> BillStore {
        let dir = std::env::temp_dir().join(format!("emporos-bills-{}", Uuid::new_v4()));
        BillStore::new(dir)
    }

    fn finalized_bill(cashier: &str) -> Bill {
        let ledger = StockLedger::with_items(vec![CatalogItem::new(
            "Mouse",
            "Electronics",
            "Accessories",
            2_500,
            100,
        )]);
        let numbers = BillNumberGenerator::new();
        let mut builder = BillBuilder::new();
        builder.add_line(&ledger, "Mouse", 2).unwrap();
        builder
            .finalize(cashier, "Electronics", &SaleTerms::untaxed(), &numbers)
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load_for_day() {
        let store = temp_store();
        let bill = finalized_bill("alice");

        store.save_bill(&bill).await.unwrap();
        let loaded = store.load_bills_for_day(bill.sale_date()).await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], bill);
        // Persisted totals are byte-for-byte the assembler's.
        assert_eq!(loaded[0].total().cents(), 5_000);
    }

    #[tokio::test]
    async fn test_save_appends_within_a_day() {
        let store = temp_store();
        let first = finalized_bill("alice");
        let second = finalized_bill("bob");

        store.save_bill(&first).await.unwrap();
        store.save_bill(&second).await.unwrap();

        let loaded = store.load_bills_for_day(first.sale_date()).await.unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_day_reads_as_no_bills() {
        let store = temp_store();
        let loaded = store.load_bills_for_day(Utc::now()).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_find_bill() {
        let store = temp_store();
        let bill = finalized_bill("alice");
        store.save_bill(&bill).await.unwrap();

        let found = store
            .find_bill(bill.sale_date(), bill.bill_number())
            .await
            .unwrap();
        assert_eq!(found, bill);

        let missing = store.find_bill(bill.sale_date(), "BILL-0").await;
        assert!(matches!(missing, Err(StoreError::NotFound { .. })));
    }
}
