//! Quantity-discount tiers and the tier resolver.

use serde::{Deserialize, Serialize};

use crate::ids::TierId;
use crate::money::Money;

/// One quantity-discount tier: a unit price that applies at or above a
/// minimum quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    /// Unique tier identifier.
    pub id: TierId,
    /// Display name, e.g. "Wholesale".
    pub name: String,
    /// Minimum quantity for the tier to apply. Positive.
    pub min_quantity: i64,
    /// Unit price at or above the minimum.
    pub price: Money,
    /// Inactive tiers are ignored by the resolver.
    pub is_active: bool,
}

impl PriceTier {
    /// Create an active tier.
    pub fn new(name: impl Into<String>, min_quantity: i64, price: Money) -> Self {
        Self {
            id: TierId::generate(),
            name: name.into(),
            min_quantity,
            price,
            is_active: true,
        }
    }
}

/// The nearest tier a buyer could still reach, and what reaching it is worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextTierInfo {
    /// Units still needed to reach the tier's minimum.
    pub pairs_needed: i64,
    /// Projected total saving at the tier's minimum quantity and price.
    /// This is the full projected total, not the incremental saving on
    /// units already in the order.
    pub potential_saving: Money,
    /// Name of the target tier.
    pub tier_name: String,
}

/// Select the tier that applies at a quantity.
///
/// Active tiers only; the highest qualifying minimum wins. Returns `None`
/// when the quantity is below every minimum, leaving the unit price at
/// base. Two tiers sharing a minimum is a data error; the cheaper one wins
/// deterministically.
pub fn find_applicable_tier(quantity: i64, tiers: &[PriceTier]) -> Option<&PriceTier> {
    let mut eligible: Vec<&PriceTier> = tiers
        .iter()
        .filter(|t| t.is_active && t.min_quantity <= quantity)
        .collect();
    eligible.sort_by(|a, b| {
        b.min_quantity
            .cmp(&a.min_quantity)
            .then(a.price.amount_cents.cmp(&b.price.amount_cents))
    });
    eligible.first().copied()
}

/// Describe the nearest tier above the current quantity.
///
/// `potential_saving` projects the buyer's total saving if the order grew
/// to the tier's minimum at the tier's price, relative to the current unit
/// price. Returns `None` when no active tier lies above the quantity.
pub fn next_tier_info(
    current_quantity: i64,
    current_unit_price: Money,
    tiers: &[PriceTier],
) -> Option<NextTierInfo> {
    let next = tiers
        .iter()
        .filter(|t| t.is_active && t.min_quantity > current_quantity)
        .min_by_key(|t| (t.min_quantity, t.price.amount_cents))?;

    let saving_cents =
        (current_unit_price.amount_cents - next.price.amount_cents) * next.min_quantity;
    Some(NextTierInfo {
        pairs_needed: next.min_quantity - current_quantity,
        potential_saving: Money::new(saving_cents, current_unit_price.currency),
        tier_name: next.name.clone(),
    })
}
