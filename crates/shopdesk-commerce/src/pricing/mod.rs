//! Pricing: quantity tiers, grade sale modes, and price quotes.

mod grade;
mod quote;
mod tier;

pub use grade::{quote, CustomGradeSelection, GradeConfig, SaleMode, TierCalculationMode};
pub use quote::{AppliedTier, DiscountBreakdown, PriceQuote, Savings};
pub use tier::{find_applicable_tier, next_tier_info, NextTierInfo, PriceTier};
