//! # Stock Ledger
//!
//! Single source of truth for item stock and sold counters.
//!
//! ## Ownership
//! The ledger owns the in-memory catalog and is its only writer. Readers
//! (pricer, aggregator, presentation) work from [`snapshot`] copies taken
//! after the lock is released, so they always see a consistent state.
//!
//! ## Concurrency
//! Two cashier terminals selling the same item must not both pass the stock
//! check and jointly take stock below zero. Every sell is therefore an
//! atomic check-and-decrement inside one mutex-guarded critical section,
//! never a check-then-act across two calls.
//!
//! [`snapshot`]: StockLedger::snapshot

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CatalogItem;
use crate::validation::validate_quantity;

/// Snapshot of one catalog item taken inside the sell critical section.
///
/// Captures exactly what a bill line needs: the canonical name, the
/// category, and the unit price at the moment stock was deducted. Handing
/// this out (rather than a live item reference) is what lets the assembler
/// freeze prices into the bill.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSnapshot {
    pub name: String,
    pub category: String,
    pub unit_price: Money,
}

/// The stock ledger: owns per-item stock/sold counters and is the only
/// component allowed to mutate them.
///
/// Items are keyed by lowercased name (identity is a case-insensitive name
/// match). A `BTreeMap` keeps snapshots deterministically ordered.
#[derive(Debug, Default)]
pub struct StockLedger {
    catalog: Mutex<BTreeMap<String, CatalogItem>>,
}

impl StockLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        StockLedger {
            catalog: Mutex::new(BTreeMap::new()),
        }
    }

    /// Creates a ledger seeded with a catalog snapshot, e.g. one loaded by
    /// the catalog store.
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        let ledger = StockLedger::new();
        ledger.load(items);
        ledger
    }

    /// Replaces the catalog with the given items.
    pub fn load(&self, items: Vec<CatalogItem>) {
        let mut catalog = self.lock();
        catalog.clear();
        for item in items {
            catalog.insert(item.name.to_lowercase(), item);
        }
    }

    /// Inserts or replaces a single item.
    pub fn upsert(&self, item: CatalogItem) {
        self.lock().insert(item.name.to_lowercase(), item);
    }

    /// Sells `quantity` units of the named item.
    ///
    /// The stock check, the decrement, and the sold-counter increment all
    /// happen under one lock acquisition; either the whole deduction
    /// happens or nothing does. On success returns a [`LineSnapshot`]
    /// captured in the same critical section.
    pub fn sell(&self, name: &str, quantity: i64) -> CoreResult<LineSnapshot> {
        validate_quantity(quantity, None)?;

        let mut catalog = self.lock();
        let item = catalog
            .get_mut(&name.to_lowercase())
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))?;

        if let Err(err) = item.sell(quantity) {
            warn!(name = %item.name, qty = %quantity, stock = %item.stock_quantity(), "Sell rejected");
            return Err(err);
        }

        debug!(name = %item.name, qty = %quantity, remaining = %item.stock_quantity(), "Stock deducted");

        Ok(LineSnapshot {
            name: item.name.clone(),
            category: item.category.clone(),
            unit_price: item.price(),
        })
    }

    /// Adds `quantity` units of the named item back to stock.
    ///
    /// Negative quantities are rejected with the stock level untouched;
    /// zero is a no-op.
    pub fn restock(&self, name: &str, quantity: i64) -> CoreResult<()> {
        let mut catalog = self.lock();
        let item = catalog
            .get_mut(&name.to_lowercase())
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))?;

        item.restock(quantity)?;

        debug!(name = %item.name, qty = %quantity, stock = %item.stock_quantity(), "Restocked");
        Ok(())
    }

    /// Pure predicate: `stock >= quantity` for the named item.
    pub fn has_sufficient_stock(&self, name: &str, quantity: i64) -> CoreResult<bool> {
        let catalog = self.lock();
        let item = catalog
            .get(&name.to_lowercase())
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))?;

        Ok(item.has_sufficient_stock(quantity))
    }

    /// Returns a copy of the named item, if present.
    pub fn get(&self, name: &str) -> Option<CatalogItem> {
        self.lock().get(&name.to_lowercase()).cloned()
    }

    /// Consistent post-lock copy of the whole catalog, ordered by name.
    pub fn snapshot(&self) -> Vec<CatalogItem> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, CatalogItem>> {
        self.catalog.lock().expect("Catalog mutex poisoned")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
