//! # Catalog Store
//!
//! Flat-file persistence for the item catalog.
//!
//! ## Usage Pattern
//! The engine works on in-memory snapshots: the caller loads the inventory
//! before a sale begins (usually into a `StockLedger`) and saves the
//! ledger's snapshot back after a successful finalization. This store never
//! touches stock counters itself.

use std::path::{Path, PathBuf};

use tracing::debug;

use emporos_core::types::CatalogItem;

use crate::error::StoreResult;
use crate::file;

/// JSON-backed catalog store (one file, an array of items).
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Creates a store over the given file path. The file need not exist
    /// yet; a missing file reads as an empty inventory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full inventory.
    pub async fn load_inventory(&self) -> StoreResult<Vec<CatalogItem>> {
        let items: Vec<CatalogItem> = file::read_json_or_default(&self.path).await?;
        debug!(path = %self.path.display(), count = items.len(), "Loaded inventory");
        Ok(items)
    }

    /// Persists the full inventory, replacing the previous contents.
    pub async fn save_inventory(&self, items: &[CatalogItem]) -> StoreResult<()> {
        debug!(path = %self.path.display(), count = items.len(), "Saving inventory");
        file::write_json(&self.path, &items).await
    }

    /// Loads the items belonging to one sector (case-insensitive label
    /// match).
    pub async fn load_by_sector(&self, sector: &str) -> StoreResult<Vec<CatalogItem>> {
        let mut items = self.load_inventory().await?;
        items.retain(|item| item.sector.eq_ignore_ascii_case(sector));
        Ok(items)
    }

    /// Loads the items in one category (case-insensitive label match).
    pub async fn filter_by_category(&self, category: &str) -> StoreResult<Vec<CatalogItem>> {
        let mut items = self.load_inventory().await?;
        items.retain(|item| item.category.eq_ignore_ascii_case(category));
        Ok(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> CatalogStore {
        let path = std::env::temp_dir().join(format!("emporos-catalog-{}.json", Uuid::new_v4()));
        CatalogStore::new(path)
    }

    fn sample_inventory() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("Laptop", "Electronics", "Computers", 100_000, 5),
            CatalogItem::new("Mouse", "Electronics", "Accessories", 2_500, 20),
            CatalogItem::new("Apples", "Groceries", "Produce", 300, 50),
        ]
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty_inventory() {
        let store = temp_store();
        let items = store.load_inventory().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let store = temp_store();
        let inventory = sample_inventory();

        store.save_inventory(&inventory).await.unwrap();
        let loaded = store.load_inventory().await.unwrap();

        assert_eq!(loaded, inventory);
    }

    #[tokio::test]
    async fn test_load_by_sector() {
        let store = temp_store();
        store.save_inventory(&sample_inventory()).await.unwrap();

        let electronics = store.load_by_sector("electronics").await.unwrap();
        assert_eq!(electronics.len(), 2);
        assert!(electronics.iter().all(|i| i.sector == "Electronics"));
    }

    #[tokio::test]
    async fn test_filter_by_category() {
        let store = temp_store();
        store.save_inventory(&sample_inventory()).await.unwrap();

        let produce = store.filter_by_category("PRODUCE").await.unwrap();
        assert_eq!(produce.len(), 1);
        assert_eq!(produce[0].name, "Apples");
    }

    #[tokio::test]
    async fn test_save_replaces_previous_contents() {
        let store = temp_store();
        store.save_inventory(&sample_inventory()).await.unwrap();

        let smaller = vec![CatalogItem::new("Mouse", "Electronics", "Accessories", 2_500, 19)];
        store.save_inventory(&smaller).await.unwrap();

        let loaded = store.load_inventory().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].stock_quantity(), 19);
    }
}
