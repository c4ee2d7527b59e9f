//! # Line-Item Pricer
//!
//! Pure monetary computation. Nothing in this module mutates an item or a
//! bill; everything is a deterministic function of its arguments.
//!
//! ## Total Computation
//! ```text
//! subtotal = Σ unit_price × quantity                 (ordered fold)
//! discount = subtotal × discount_rate   if eligible
//! tax      = subtotal × tax_rate        if taxable
//! total    = subtotal − discount + tax
//! ```
//!
//! The two eligibility decisions are independent compound conditions:
//!
//! - discount applies iff `has_discount ∧ discount_valid ∧ ¬is_employee`
//! - tax applies iff `taxable ∧ ¬tax_exempt`
//!
//! Each atomic condition independently flips its amount in or out of the
//! total. That shape is an observable contract of this module (the test
//! suite exercises it condition by condition), so the flags are kept as
//! separate booleans rather than collapsed into a precomputed decision.

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::{Money, Rate};
use crate::types::BillLine;
use crate::validation::validate_discount_bps;

// =============================================================================
// Sale Terms
// =============================================================================

/// The tax/discount terms applied at finalization.
///
/// Rates say *how much*; the boolean flags say *whether*. An employee sale
/// voids the discount (employees are exempt from customer promotions), and
/// a tax-exempt sale suppresses tax even when a rate is configured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleTerms {
    /// Discount rate applied to the subtotal when the discount gate passes.
    pub discount_rate: Rate,
    /// A discount is on offer for this sale.
    pub has_discount: bool,
    /// The offered discount is currently valid (not expired or revoked).
    pub discount_valid: bool,
    /// The buyer is an employee; employee sales never take the discount.
    pub is_employee: bool,

    /// Tax rate applied to the subtotal when the tax gate passes.
    pub tax_rate: Rate,
    /// The sale is of taxable goods.
    pub taxable: bool,
    /// The buyer holds a tax exemption.
    pub tax_exempt: bool,
}

impl SaleTerms {
    /// Plain cash sale: no discount, no tax.
    pub fn untaxed() -> Self {
        SaleTerms {
            discount_rate: Rate::zero(),
            has_discount: false,
            discount_valid: false,
            is_employee: false,
            tax_rate: Rate::zero(),
            taxable: false,
            tax_exempt: false,
        }
    }

    /// Whether the discount gate passes.
    #[inline]
    pub fn discount_applies(&self) -> bool {
        self.has_discount && self.discount_valid && !self.is_employee
    }

    /// Whether the tax gate passes.
    #[inline]
    pub fn tax_applies(&self) -> bool {
        self.taxable && !self.tax_exempt
    }
}

impl Default for SaleTerms {
    fn default() -> Self {
        SaleTerms::untaxed()
    }
}

// =============================================================================
// Pricing Functions
// =============================================================================

/// Computes `unit_price × quantity` for one line.
///
/// A negative price or quantity is a caller contract violation, not
/// something to silently coerce.
pub fn line_amount(unit_price: Money, quantity: i64) -> CoreResult<Money> {
    if unit_price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit price".to_string(),
        }
        .into());
    }
    if quantity < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        }
        .into());
    }

    Ok(unit_price * quantity)
}

/// Sums the line totals of an ordered sequence of lines.
///
/// The fold is commutative, but the deterministic order keeps totals
/// reproducible for printing and comparison.
pub fn subtotal(lines: &[BillLine]) -> Money {
    lines
        .iter()
        .fold(Money::zero(), |acc, line| acc + line.line_total())
}

/// Computes the discount amount on a subtotal.
///
/// The rate must be in [0%, 100%]; out of range is an argument error.
pub fn discount_amount(subtotal: Money, rate: Rate) -> CoreResult<Money> {
    validate_discount_bps(rate.bps())?;
    Ok(subtotal.portion(rate))
}

/// Computes the tax amount on a subtotal.
///
/// Rates are basis points; unsigned, so no negative-rate check is needed
/// and there is no upper bound.
pub fn tax_amount(subtotal: Money, rate: Rate) -> Money {
    subtotal.portion(rate)
}

/// Locks in the grand total from premultiplied amounts and the eligibility
/// flags: subtract `discount` only when the discount gate passes, add `tax`
/// only when the tax gate passes.
pub fn final_total(subtotal: Money, tax: Money, discount: Money, terms: &SaleTerms) -> Money {
    let mut total = subtotal;
    if terms.discount_applies() {
        total -= discount;
    }
    if terms.tax_applies() {
        total += tax;
    }
    total
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::generate_line_id;

    fn line(price_cents: i64, qty: i64) -> BillLine {
        BillLine {
            line_id: generate_line_id(),
            item_name: "Item".to_string(),
            category: "Cat".to_string(),
            quantity: qty,
            unit_price_cents: price_cents,
            line_total_cents: price_cents * qty,
        }
    }

    fn terms(
        has_discount: bool,
        discount_valid: bool,
        is_employee: bool,
        taxable: bool,
        tax_exempt: bool,
    ) -> SaleTerms {
        SaleTerms {
            discount_rate: Rate::from_bps(1000), // 10%
            has_discount,
            discount_valid,
            is_employee,
            tax_rate: Rate::from_bps(2000), // 20%
            taxable,
            tax_exempt,
        }
    }

    #[test]
    fn test_line_amount() {
        let amount = line_amount(Money::from_cents(299), 3).unwrap();
        assert_eq!(amount.cents(), 897);
    }

    #[test]
    fn test_line_amount_zero_quantity_is_zero() {
        assert_eq!(line_amount(Money::from_cents(299), 0).unwrap().cents(), 0);
    }

    #[test]
    fn test_line_amount_rejects_negative_inputs() {
        assert!(line_amount(Money::from_cents(-1), 3).is_err());
        assert!(line_amount(Money::from_cents(299), -1).is_err());
    }

    #[test]
    fn test_subtotal_ordered_fold() {
        let lines = vec![line(100_000, 1), line(2500, 2)];
        assert_eq!(subtotal(&lines).cents(), 105_000);
        assert_eq!(subtotal(&[]).cents(), 0);
    }

    #[test]
    fn test_discount_amount_bounds() {
        let sub = Money::from_cents(10_000);
        assert_eq!(discount_amount(sub, Rate::from_bps(1000)).unwrap().cents(), 1000);
        assert_eq!(
            discount_amount(sub, Rate::from_bps(10000)).unwrap().cents(),
            10_000
        );
        assert!(discount_amount(sub, Rate::from_bps(10001)).is_err());
    }

    #[test]
    fn test_tax_amount() {
        assert_eq!(tax_amount(Money::from_cents(10_000), Rate::from_bps(825)).cents(), 825);
    }

    // -------------------------------------------------------------------------
    // Eligibility gates, condition by condition.
    //
    // Subtotal $100.00, discount $10.00, tax $20.00. Each case toggles
    // exactly one flag against a baseline and asserts the total flips.
    // -------------------------------------------------------------------------

    const SUB: Money = Money::from_cents(10_000);
    const TAX: Money = Money::from_cents(2_000);
    const DISC: Money = Money::from_cents(1_000);

    #[test]
    fn test_discount_gate_all_conditions_met() {
        // (T, T, ¬F) → discount taken
        let t = terms(true, true, false, false, false);
        assert_eq!(final_total(SUB, TAX, DISC, &t).cents(), 9_000);
    }

    #[test]
    fn test_discount_gate_has_discount_flips_outcome() {
        let t = terms(false, true, false, false, false);
        assert_eq!(final_total(SUB, TAX, DISC, &t).cents(), 10_000);
    }

    #[test]
    fn test_discount_gate_validity_flips_outcome() {
        let t = terms(true, false, false, false, false);
        assert_eq!(final_total(SUB, TAX, DISC, &t).cents(), 10_000);
    }

    #[test]
    fn test_discount_gate_employee_flips_outcome() {
        let t = terms(true, true, true, false, false);
        assert_eq!(final_total(SUB, TAX, DISC, &t).cents(), 10_000);
    }

    #[test]
    fn test_tax_gate_taxable_and_not_exempt() {
        let t = terms(false, false, false, true, false);
        assert_eq!(final_total(SUB, TAX, DISC, &t).cents(), 12_000);
    }

    #[test]
    fn test_tax_gate_taxable_flips_outcome() {
        let t = terms(false, false, false, false, false);
        assert_eq!(final_total(SUB, TAX, DISC, &t).cents(), 10_000);
    }

    #[test]
    fn test_tax_gate_exemption_flips_outcome() {
        let t = terms(false, false, false, true, true);
        assert_eq!(final_total(SUB, TAX, DISC, &t).cents(), 10_000);
    }

    #[test]
    fn test_both_gates_pass_together() {
        let t = terms(true, true, false, true, false);
        // 10000 − 1000 + 2000
        assert_eq!(final_total(SUB, TAX, DISC, &t).cents(), 11_000);
    }
}
