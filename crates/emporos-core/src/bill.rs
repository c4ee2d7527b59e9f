//! # Bill Assembler
//!
//! Orchestrates adding lines to an in-progress bill and finalizing it
//! exactly once.
//!
//! ## State Machine
//! ```text
//! Empty ──add_line──► Building ──add_line──► Building
//!                        │
//!                    finalize
//!                        ▼
//!                    Finalized   (add_line / remove_line / finalize all fail)
//! ```
//!
//! ## Failure Semantics
//! Every validation failure is reported synchronously and leaves no partial
//! mutation behind: either a line is fully recorded with its matching stock
//! deduction, or nothing changes. Retries, if any, belong to the caller.

use std::sync::Mutex;

use chrono::Utc;
use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::ledger::StockLedger;
use crate::money::Money;
use crate::pricing::{self, SaleTerms};
use crate::types::{generate_line_id, Bill, BillLine};
use crate::validation::validate_quantity;

// =============================================================================
// Bill Number Generator
// =============================================================================

/// Issues bill numbers derived from the current timestamp.
///
/// An explicitly constructed object rather than a static counter: callers
/// hold one generator per process (or per test) and pass it where it is
/// needed. Numbers are `BILL-{millis}`; when two bills are finalized within
/// the same clock tick, a sequence suffix keeps them distinct.
#[derive(Debug, Default)]
pub struct BillNumberGenerator {
    last: Mutex<(i64, u32)>,
}

impl BillNumberGenerator {
    pub fn new() -> Self {
        BillNumberGenerator {
            last: Mutex::new((0, 0)),
        }
    }

    /// Returns the next unique bill number.
    pub fn next(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let mut last = self.last.lock().expect("Bill number mutex poisoned");

        if millis == last.0 {
            last.1 += 1;
            format!("BILL-{}-{}", millis, last.1)
        } else {
            *last = (millis, 0);
            format!("BILL-{}", millis)
        }
    }
}

// =============================================================================
// Bill Policy
// =============================================================================

/// Deployment-configurable assembly limits.
///
/// Some deployments cap the units a single line may carry; the engine
/// default is unlimited.
#[derive(Debug, Clone, Copy, Default)]
pub struct BillPolicy {
    /// Maximum units per line, `None` for unlimited.
    pub max_line_quantity: Option<i64>,
}

impl BillPolicy {
    /// The 100-unit per-line cap used by retail floor deployments.
    pub fn capped() -> Self {
        BillPolicy {
            max_line_quantity: Some(100),
        }
    }
}

// =============================================================================
// Bill Builder
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BillState {
    Empty,
    Building,
    Finalized,
}

/// Assembles one bill: validates each line, drives the stock ledger, and
/// produces the immutable [`Bill`] at finalization.
#[derive(Debug)]
pub struct BillBuilder {
    state: BillState,
    lines: Vec<BillLine>,
    policy: BillPolicy,
    /// Set at finalization; kept only for error context afterwards.
    bill_number: Option<String>,
}

impl BillBuilder {
    /// Creates an empty builder with the default (uncapped) policy.
    pub fn new() -> Self {
        BillBuilder::with_policy(BillPolicy::default())
    }

    /// Creates an empty builder with an explicit policy.
    pub fn with_policy(policy: BillPolicy) -> Self {
        BillBuilder {
            state: BillState::Empty,
            lines: Vec::new(),
            policy,
            bill_number: None,
        }
    }

    /// Adds a line for `quantity` units of the named catalog item.
    ///
    /// The ledger performs the stock check and the deduction atomically;
    /// the returned snapshot freezes the unit price into the line, so later
    /// catalog price changes cannot alter this bill. On any failure the
    /// bill and the ledger are both unchanged.
    pub fn add_line(
        &mut self,
        ledger: &StockLedger,
        item_name: &str,
        quantity: i64,
    ) -> CoreResult<&BillLine> {
        self.ensure_open()?;
        validate_quantity(quantity, self.policy.max_line_quantity)?;

        // Atomic check-and-decrement; also yields the price snapshot.
        let snapshot = ledger.sell(item_name, quantity)?;
        let line_total = pricing::line_amount(snapshot.unit_price, quantity)?;

        self.lines.push(BillLine {
            line_id: generate_line_id(),
            item_name: snapshot.name,
            category: snapshot.category,
            quantity,
            unit_price_cents: snapshot.unit_price.cents(),
            line_total_cents: line_total.cents(),
        });
        self.state = BillState::Building;

        Ok(self.lines.last().expect("line just pushed"))
    }

    /// Removes a previously added line and recomputes the running subtotal.
    ///
    /// Deliberately does not restock: stock compensation for an abandoned
    /// line is a catalog-management workflow, applied outside the sale.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<()> {
        self.ensure_open()?;

        let before = self.lines.len();
        self.lines.retain(|line| line.line_id != line_id);
        if self.lines.len() == before {
            return Err(CoreError::LineNotFound(line_id.to_string()));
        }

        if self.lines.is_empty() {
            self.state = BillState::Empty;
        }
        Ok(())
    }

    /// Running subtotal over the lines added so far.
    pub fn running_subtotal(&self) -> Money {
        pricing::subtotal(&self.lines)
    }

    /// Lines added so far.
    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Finalizes the bill: computes discount, tax, and total under the
    /// given terms, assigns a bill number and sale timestamp, and returns
    /// the immutable [`Bill`].
    ///
    /// Fails with `EmptyBill` when no lines were added. After success the
    /// builder holds no reference to the line sequence and rejects all
    /// further mutation.
    pub fn finalize(
        &mut self,
        cashier: &str,
        sector: &str,
        terms: &SaleTerms,
        numbers: &BillNumberGenerator,
    ) -> CoreResult<Bill> {
        self.ensure_open()?;
        if self.lines.is_empty() {
            return Err(CoreError::EmptyBill);
        }

        let subtotal = pricing::subtotal(&self.lines);
        let discount = pricing::discount_amount(subtotal, terms.discount_rate)?;
        let tax = pricing::tax_amount(subtotal, terms.tax_rate);
        let total = pricing::final_total(subtotal, tax, discount, terms);

        // Only the applied amounts are recorded on the bill, so the stored
        // record always reconciles as total = subtotal - discount + tax.
        let recorded_discount = if terms.discount_applies() {
            discount
        } else {
            Money::zero()
        };
        let recorded_tax = if terms.tax_applies() { tax } else { Money::zero() };

        let bill_number = numbers.next();
        self.bill_number = Some(bill_number.clone());
        self.state = BillState::Finalized;

        let bill = Bill::new(
            bill_number,
            std::mem::take(&mut self.lines),
            subtotal,
            recorded_tax,
            recorded_discount,
            total,
            Utc::now(),
            cashier.to_string(),
            sector.to_string(),
        );

        info!(
            bill_number = %bill.bill_number(),
            total = %bill.total(),
            lines = bill.lines().len(),
            "Bill finalized"
        );

        Ok(bill)
    }

    fn ensure_open(&self) -> CoreResult<()> {
        if self.state == BillState::Finalized {
            return Err(CoreError::AlreadyFinalized {
                bill_number: self
                    .bill_number
                    .clone()
                    .unwrap_or_else(|| "<unknown>".to_string()),
            });
        }
        Ok(())
    }
}

impl Default for BillBuilder {
    fn default() -> Self {
        BillBuilder::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
