//! Price quote result types.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing::tier::NextTierInfo;

/// Reason string when nothing lowered the price.
pub(crate) const NO_DISCOUNT: &str = "no discount";

/// Discount portion of a quote.
///
/// `amount` is the pre-discount total minus the final total and may be
/// negative when a surcharge raised the price above base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountBreakdown {
    pub amount: Money,
    pub percentage: f64,
    pub reason: String,
}

/// The tier that set the quote's unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedTier {
    pub name: String,
    pub min_quantity: i64,
    pub price: Money,
}

/// Saving relative to the full-grade baseline at the same pair count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    pub amount: Money,
    pub percentage: f64,
}

/// A complete price quote for one variation under one sale mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Pre-discount total: base unit price times quantity.
    pub base_price: Money,
    /// Final per-unit price.
    pub unit_price: Money,
    /// Final total: `unit_price * total_pairs`.
    pub total_price: Money,
    /// Quantity the quote covers.
    pub total_pairs: i64,
    /// Discount applied, with a display reason.
    pub discount: DiscountBreakdown,
    /// The tier that won, when one did.
    pub applied_tier: Option<AppliedTier>,
    /// The nearest reachable tier above the current quantity.
    pub next_tier: Option<NextTierInfo>,
    /// Saving against buying the same pairs at the full-grade unit price.
    pub savings_vs_full_grade: Option<Savings>,
}

impl PriceQuote {
    /// The safe default: zero pairs at the base unit price, no discount.
    ///
    /// Returned whenever pricing cannot proceed (no grade configuration,
    /// malformed grade data, missing custom selection) so the console
    /// always has something to render.
    pub fn empty(base_unit_price: Money) -> Self {
        let zero = Money::zero(base_unit_price.currency);
        Self {
            base_price: zero,
            unit_price: base_unit_price,
            total_price: zero,
            total_pairs: 0,
            discount: DiscountBreakdown {
                amount: zero,
                percentage: 0.0,
                reason: NO_DISCOUNT.to_string(),
            },
            applied_tier: None,
            next_tier: None,
            savings_vs_full_grade: None,
        }
    }

    /// True when anything lowered the unit price below base.
    pub fn has_discount(&self) -> bool {
        self.discount.amount.is_positive()
    }
}

/// Percentage of `part` in `whole`, 0.0 when `whole` is zero.
pub(crate) fn percent_of(part_cents: i64, whole_cents: i64) -> f64 {
    if whole_cents == 0 {
        0.0
    } else {
        part_cents as f64 / whole_cents as f64 * 100.0
    }
}
