//! # Sales Aggregator
//!
//! Pure, repeatable folds over catalog items and bills for reporting.
//!
//! Every function here is deterministic in its arguments: no internal
//! accumulator survives between calls, nothing mutates its inputs, and
//! running the same aggregation twice over the same snapshot yields the
//! same numbers. Metrics are derived on demand and discarded; the persisted
//! items and bills remain the source of truth.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Bill, CatalogItem, User};

// =============================================================================
// Summary Types
// =============================================================================

/// Revenue and volume over a catalog snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Σ unit price × units sold.
    pub total_revenue: Money,
    /// Σ units sold.
    pub total_items_sold: i64,
}

/// The admin cost/profit rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminReport {
    /// Σ bill totals.
    pub total_income: Money,
    /// Σ price × stock over purchased items + Σ employee salaries.
    pub total_costs: Money,
    /// Income − costs; negative when the store is operating at a loss.
    pub net_profit: Money,
}

// =============================================================================
// Aggregations
// =============================================================================

/// Folds a catalog snapshot into total revenue and items sold.
pub fn sales_summary(items: &[CatalogItem]) -> SalesSummary {
    let mut summary = SalesSummary {
        total_revenue: Money::zero(),
        total_items_sold: 0,
    };
    for item in items {
        summary.total_revenue += item.price() * item.items_sold();
        summary.total_items_sold += item.items_sold();
    }
    summary
}

/// Sums the totals of the given bills that fall on the same calendar day
/// as `reference`.
///
/// Pass a cashier's bills to get that cashier's daily takings.
pub fn cashier_daily_total(bills: &[Bill], reference: DateTime<Utc>) -> Money {
    bills
        .iter()
        .filter(|bill| same_calendar_day(Some(bill.sale_date()), Some(reference)))
        .fold(Money::zero(), |acc, bill| acc + bill.total())
}

/// Computes the admin cost/profit rollup.
///
/// `purchased_items` is the replacement-cost inventory (price × stock);
/// employee salaries are added to costs. Reporting only, nothing is
/// persisted.
pub fn admin_report(bills: &[Bill], purchased_items: &[CatalogItem], employees: &[User]) -> AdminReport {
    let total_income = bills
        .iter()
        .fold(Money::zero(), |acc, bill| acc + bill.total());

    let mut total_costs = Money::zero();
    for item in purchased_items {
        total_costs += item.price() * item.stock_quantity();
    }
    for employee in employees {
        total_costs += employee.salary();
    }

    AdminReport {
        total_income,
        total_costs,
        net_profit: total_income - total_costs,
    }
}

/// Two timestamps fall on the same calendar day iff both the year and the
/// day-of-year match (calendar-local, no duration arithmetic). A missing
/// date on either side is never the same day.
pub fn same_calendar_day(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.year() == b.year() && a.ordinal() == b.ordinal(),
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
