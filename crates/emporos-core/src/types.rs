//! # Domain Types
//!
//! Core domain types for Emporos POS.
//!
//! ## Two Item Shapes
//! The system deliberately carries two distinct item shapes:
//!
//! - [`CatalogItem`] - the persisted, mutable stock-keeping unit. Its
//!   stock/sold counters move only through the ledger path.
//! - [`BillLine`] - an immutable value representing "this many units of X
//!   sold in this bill", with the unit price captured at sale time so later
//!   catalog price changes cannot retroactively alter a finalized bill.
//!
//! ## Role Model
//! A single [`User`] entity with a [`Role`] tag replaces a subclass-per-role
//! hierarchy: role-specific data (a manager's sectors, a cashier's assigned
//! sector) lives in the variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Catalog Item
// =============================================================================

/// A stock-keeping unit in the catalog.
///
/// Identity within a sector/category is the item name, matched
/// case-insensitively. The stock and sold counters are private: the only
/// mutators are [`sell`](CatalogItem::sell) and
/// [`restock`](CatalogItem::restock), and in the running system those are
/// invoked solely by the stock ledger inside its critical section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display name; identity key (case-insensitive match).
    pub name: String,

    /// Top-level merchandising division (e.g. "Electronics").
    pub sector: String,

    /// Category within the sector.
    pub category: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Supplier reference, by name.
    pub supplier: Option<String>,

    /// Opaque image reference; irrelevant to the engine.
    pub image_path: Option<String>,

    /// Unit selling price in cents (non-negative).
    pub price_cents: i64,

    stock_quantity: i64,
    items_sold: i64,
}

impl CatalogItem {
    /// Creates a new catalog item with a starting stock level and a zero
    /// sold counter.
    pub fn new(
        name: impl Into<String>,
        sector: impl Into<String>,
        category: impl Into<String>,
        price_cents: i64,
        stock_quantity: i64,
    ) -> Self {
        CatalogItem {
            name: name.into(),
            sector: sector.into(),
            category: category.into(),
            description: None,
            supplier: None,
            image_path: None,
            price_cents,
            stock_quantity,
            items_sold: 0,
        }
    }

    /// Returns the unit selling price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Current stock level.
    #[inline]
    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    /// Cumulative units sold.
    #[inline]
    pub fn items_sold(&self) -> i64 {
        self.items_sold
    }

    /// Pure predicate: is there enough stock to cover `quantity`?
    #[inline]
    pub fn has_sufficient_stock(&self, quantity: i64) -> bool {
        self.stock_quantity >= quantity
    }

    /// Sells `quantity` units: decrements stock and increments the sold
    /// counter together, or does neither.
    ///
    /// Fails with `InsufficientStock` when `quantity` exceeds stock and with
    /// a validation error when `quantity` is not positive. On any failure
    /// both counters are untouched.
    pub fn sell(&mut self, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }
        if quantity > self.stock_quantity {
            return Err(CoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.stock_quantity,
                requested: quantity,
            });
        }
        self.stock_quantity -= quantity;
        self.items_sold += quantity;
        Ok(())
    }

    /// Adds `quantity` units to stock.
    ///
    /// A negative quantity is rejected; zero is a no-op, not an error.
    pub fn restock(&mut self, quantity: i64) -> CoreResult<()> {
        if quantity < 0 {
            return Err(ValidationError::MustBeNonNegative {
                field: "restock quantity".to_string(),
            }
            .into());
        }
        self.stock_quantity += quantity;
        Ok(())
    }
}

// =============================================================================
// Bill Line
// =============================================================================

/// One line of a bill: an immutable (item, quantity, unit price, category)
/// value, distinct from the catalog entity it was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    /// Unique line identifier within the bill.
    pub line_id: String,

    /// Item name at time of sale.
    pub item_name: String,

    /// Category at time of sale.
    pub category: String,

    /// Units sold on this line.
    pub quantity: i64,

    /// Unit price in cents, captured when the line was added.
    pub unit_price_cents: i64,

    /// Line total before tax (unit price × quantity).
    pub line_total_cents: i64,
}

impl BillLine {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// Generates a new bill line ID.
pub fn generate_line_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Bill
// =============================================================================

/// An immutable record of one completed transaction.
///
/// Constructed only by the bill assembler at finalization, which is where
/// `total = subtotal - discount + tax` is locked in. Fields are private so
/// a finalized bill cannot be edited into inconsistency; accessors hand out
/// owned or borrowed views that cannot reach back into the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    bill_number: String,
    lines: Vec<BillLine>,
    subtotal_cents: i64,
    tax_cents: i64,
    discount_cents: i64,
    total_cents: i64,
    sale_date: DateTime<Utc>,
    cashier: String,
    sector: String,
}

impl Bill {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        bill_number: String,
        lines: Vec<BillLine>,
        subtotal: Money,
        tax: Money,
        discount: Money,
        total: Money,
        sale_date: DateTime<Utc>,
        cashier: String,
        sector: String,
    ) -> Self {
        Bill {
            bill_number,
            lines,
            subtotal_cents: subtotal.cents(),
            tax_cents: tax.cents(),
            discount_cents: discount.cents(),
            total_cents: total.cents(),
            sale_date,
            cashier,
            sector,
        }
    }

    #[inline]
    pub fn bill_number(&self) -> &str {
        &self.bill_number
    }

    /// Ordered line items of this bill.
    #[inline]
    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn sale_date(&self) -> DateTime<Utc> {
        self.sale_date
    }

    #[inline]
    pub fn cashier(&self) -> &str {
        &self.cashier
    }

    #[inline]
    pub fn sector(&self) -> &str {
        &self.sector
    }
}

// =============================================================================
// User & Role
// =============================================================================

/// Role tag with role-specific associated data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "role")]
pub enum Role {
    /// Full access; sees the admin cost/profit rollup.
    Admin,
    /// Oversees one or more sectors (low-stock routing).
    Manager { sectors: Vec<String> },
    /// Rings up sales for one assigned sector.
    Cashier { sector: String },
}

/// An employee record.
///
/// A single entity with a role tag; the aggregator treats it as an opaque
/// record exposing a salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUID v4, store-assigned).
    pub id: String,

    /// Login name, unique within the directory.
    pub username: String,

    /// Stored credential, compared verbatim at login.
    pub password: String,

    /// Display name.
    pub full_name: String,

    /// Salary in cents, used by the admin cost rollup.
    pub salary_cents: i64,

    #[serde(flatten)]
    pub role: Role,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
        salary_cents: i64,
        role: Role,
    ) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            password: password.into(),
            full_name: full_name.into(),
            salary_cents,
            role,
        }
    }

    #[inline]
    pub fn salary(&self) -> Money {
        Money::from_cents(self.salary_cents)
    }
}

// =============================================================================
// Sector & Supplier
// =============================================================================

/// A top-level merchandising division and the categories it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub categories: Vec<String>,
}

impl Sector {
    pub fn new(name: impl Into<String>, categories: Vec<String>) -> Self {
        Sector {
            name: name.into(),
            categories,
        }
    }

    /// Whether a low-stock notice for `category` routes to this sector's
    /// manager. Case-insensitive.
    pub fn covers_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}

/// A supplier and the items it sources.
///
/// The supplied-item collection is the single source of truth; anything
/// that needs an identifier list derives it from here on demand, so there
/// is no parallel list to fall out of sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    items: Vec<String>,
}

impl Supplier {
    pub fn new(name: impl Into<String>) -> Self {
        Supplier {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Adds an item to this supplier's sourcing list. Duplicate names
    /// (case-insensitive) are ignored.
    pub fn add_item(&mut self, item_name: impl Into<String>) {
        let item_name = item_name.into();
        if !self.supplies(&item_name) {
            self.items.push(item_name);
        }
    }

    /// Removes an item by name (case-insensitive).
    pub fn remove_item(&mut self, item_name: &str) {
        self.items.retain(|i| !i.eq_ignore_ascii_case(item_name));
    }

    /// Whether this supplier sources the named item.
    pub fn supplies(&self, item_name: &str) -> bool {
        self.items.iter().any(|i| i.eq_ignore_ascii_case(item_name))
    }

    /// The supplied item names, derived from the authoritative collection.
    pub fn item_names(&self) -> Vec<String> {
        self.items.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
