//! Grade pricing: full grade, half grade, and custom mix sale modes.
//!
//! A grade is a bundle of size/pair counts sold as a unit. Buyers take the
//! whole grade, a half composition at a configured discount, or assemble a
//! custom mix priced with its own adjustment. All three modes share the
//! tier lookup and produce the same [`PriceQuote`] shape.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::VariationCombination;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use crate::pricing::quote::{
    percent_of, AppliedTier, DiscountBreakdown, PriceQuote, Savings, NO_DISCOUNT,
};
use crate::pricing::tier::{find_applicable_tier, next_tier_info, NextTierInfo, PriceTier};

/// How a grade is being sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleMode {
    /// The whole configured grade.
    Full,
    /// A half composition of the grade's pairs.
    Half,
    /// A buyer-assembled mix of sizes and pairs.
    Custom,
}

impl SaleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleMode::Full => "full",
            SaleMode::Half => "half",
            SaleMode::Custom => "custom",
        }
    }
}

/// What quantity the tier thresholds count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TierCalculationMode {
    /// Tier minimums count pairs.
    #[default]
    PerPair,
    /// Tier minimums count whole grades. Partial compositions never
    /// qualify.
    PerGrade,
}

/// Grade pricing configuration attached to a grade-type combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeConfig {
    /// Whether quantity tiers apply to this grade at all.
    pub apply_quantity_tiers: bool,
    /// What the tier thresholds count.
    pub tier_calculation_mode: TierCalculationMode,
    /// Discount for half-grade purchases, 0 to 100.
    pub half_grade_discount_percentage: f64,
    /// Signed per-unit adjustment for custom mixes.
    pub custom_mix_price_adjustment: Money,
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            apply_quantity_tiers: false,
            tier_calculation_mode: TierCalculationMode::default(),
            half_grade_discount_percentage: 0.0,
            custom_mix_price_adjustment: Money::zero(Currency::default()),
        }
    }
}

impl GradeConfig {
    /// Check the configuration before it is saved by the console.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let pct = self.half_grade_discount_percentage;
        if !(0.0..=100.0).contains(&pct) || pct.is_nan() {
            return Err(CommerceError::InvalidPercentage(pct));
        }
        Ok(())
    }
}

/// A buyer-assembled selection for custom mix pricing. Built per request,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomGradeSelection {
    /// Total pairs across the chosen sizes.
    pub total_pairs: i64,
}

impl CustomGradeSelection {
    pub fn new(total_pairs: i64) -> Self {
        Self { total_pairs }
    }

    /// Sum a per-size pair selection.
    pub fn from_pairs(pairs: &[i64]) -> Self {
        Self {
            total_pairs: pairs.iter().sum(),
        }
    }
}

/// Compute a price quote for a grade-type combination.
///
/// `base_unit_price` is the product's base price; the variation's own
/// `price_adjustment` is folded in before any mode math. Missing
/// configuration, malformed grade data, and a missing custom selection all
/// degrade to [`PriceQuote::empty`] with a logged warning; this function
/// never panics.
pub fn quote(
    variation: &VariationCombination,
    config: Option<&GradeConfig>,
    base_unit_price: Money,
    mode: SaleMode,
    tiers: &[PriceTier],
    selection: Option<&CustomGradeSelection>,
) -> PriceQuote {
    let base = effective_base(variation, base_unit_price);
    let Some(config) = config else {
        warn!(
            variation = %variation.id,
            "{}",
            CommerceError::MissingGradeConfig
        );
        return PriceQuote::empty(base);
    };

    match mode {
        SaleMode::Full => quote_full(variation, config, base, tiers),
        SaleMode::Half => quote_half(variation, config, base, tiers),
        SaleMode::Custom => quote_custom(variation, config, base, tiers, selection),
    }
}

/// Full grade: every configured pair at the base or tier unit price.
fn quote_full(
    variation: &VariationCombination,
    config: &GradeConfig,
    base: Money,
    tiers: &[PriceTier],
) -> PriceQuote {
    let pairs = variation.grade_total_pairs().max(0);
    let tier_qty = tier_quantity(config, pairs, pairs);

    let mut unit = base;
    let mut applied = None;
    if config.apply_quantity_tiers {
        if let Some(tier) = find_applicable_tier(tier_qty, tiers) {
            unit = normalize(tier.price, base.currency);
            applied = Some(applied_tier(tier, base.currency));
        }
    }

    let reason = applied
        .as_ref()
        .map(|t: &AppliedTier| t.name.clone())
        .unwrap_or_else(|| NO_DISCOUNT.to_string());
    let next = reachable_tier(config, tier_qty, unit, tiers);
    assemble(base, unit, pairs, applied, reason, next)
}

/// Half grade: the half composition at the configured discount, or at the
/// equally-discounted tier price when that comes out lower. The two
/// discounts never stack; the better one wins.
fn quote_half(
    variation: &VariationCombination,
    config: &GradeConfig,
    base: Money,
    tiers: &[PriceTier],
) -> PriceQuote {
    let Some(pairs) = variation.half_composition_pairs() else {
        warn!(
            variation = %variation.id,
            "{}",
            CommerceError::MalformedGradeData("size/pair lists absent or mismatched".into())
        );
        return PriceQuote::empty(base);
    };

    let pct = config.half_grade_discount_percentage.clamp(0.0, 100.0);
    let keep = 1.0 - pct / 100.0;
    let mut unit = base.multiply_decimal(keep);
    let mut applied = None;

    let grade_size = variation.grade_total_pairs();
    let tier_qty = tier_quantity(config, pairs, grade_size);
    if config.apply_quantity_tiers {
        if let Some(tier) = find_applicable_tier(tier_qty, tiers) {
            let candidate = normalize(tier.price, base.currency).multiply_decimal(keep);
            if candidate.amount_cents < unit.amount_cents {
                unit = candidate;
                applied = Some(applied_tier(tier, base.currency));
            }
        }
    }

    let reason = match (&applied, pct > 0.0) {
        (Some(tier), _) => tier.name.clone(),
        (None, true) => "half grade discount".to_string(),
        (None, false) => NO_DISCOUNT.to_string(),
    };
    let next = reachable_tier(config, tier_qty, unit, tiers);
    let full = quote_full(variation, config, base, tiers);
    let mut quote = assemble(base, unit, pairs, applied, reason, next);
    quote.savings_vs_full_grade = savings_vs_full(full.unit_price, unit, pairs);
    quote
}

/// Custom mix: the selection's pairs with the mix adjustment stacked on the
/// base or tier unit price. Unlike half grade, the adjustment always adds.
fn quote_custom(
    variation: &VariationCombination,
    config: &GradeConfig,
    base: Money,
    tiers: &[PriceTier],
    selection: Option<&CustomGradeSelection>,
) -> PriceQuote {
    let Some(selection) = selection else {
        warn!(
            variation = %variation.id,
            "{}",
            CommerceError::MissingCustomSelection
        );
        return PriceQuote::empty(base);
    };

    let pairs = selection.total_pairs.max(0);
    let adjustment = normalize(config.custom_mix_price_adjustment, base.currency);
    let mut unit = Money::new(base.amount_cents + adjustment.amount_cents, base.currency);
    let mut applied = None;

    let grade_size = variation.grade_total_pairs();
    let tier_qty = tier_quantity(config, pairs, grade_size);
    if config.apply_quantity_tiers {
        if let Some(tier) = find_applicable_tier(tier_qty, tiers) {
            unit = Money::new(
                normalize(tier.price, base.currency).amount_cents + adjustment.amount_cents,
                base.currency,
            );
            applied = Some(applied_tier(tier, base.currency));
        }
    }

    let reason = match (&applied, adjustment.is_zero()) {
        (Some(tier), _) => tier.name.clone(),
        (None, false) => "custom mix adjustment".to_string(),
        (None, true) => NO_DISCOUNT.to_string(),
    };
    let next = reachable_tier(config, tier_qty, unit, tiers);
    let full = quote_full(variation, config, base, tiers);
    let mut quote = assemble(base, unit, pairs, applied, reason, next);
    quote.savings_vs_full_grade = savings_vs_full(full.unit_price, unit, pairs);
    quote
}

/// Base price plus the variation's own adjustment. A mismatched adjustment
/// currency is ignored with a warning rather than poisoning the quote.
fn effective_base(variation: &VariationCombination, base_unit_price: Money) -> Money {
    if variation.price_adjustment.is_zero() {
        return base_unit_price;
    }
    match base_unit_price.try_add(&variation.price_adjustment) {
        Some(adjusted) => adjusted,
        None => {
            warn!(
                variation = %variation.id,
                "price adjustment currency mismatch, using base price"
            );
            base_unit_price
        }
    }
}

/// The quantity fed to the tier resolver for this configuration.
fn tier_quantity(config: &GradeConfig, pairs: i64, grade_size: i64) -> i64 {
    match config.tier_calculation_mode {
        TierCalculationMode::PerPair => pairs,
        TierCalculationMode::PerGrade => {
            if grade_size > 0 {
                pairs / grade_size
            } else {
                0
            }
        }
    }
}

fn normalize(price: Money, currency: Currency) -> Money {
    Money::new(price.amount_cents, currency)
}

fn applied_tier(tier: &PriceTier, currency: Currency) -> AppliedTier {
    AppliedTier {
        name: tier.name.clone(),
        min_quantity: tier.min_quantity,
        price: normalize(tier.price, currency),
    }
}

/// Next-tier hint, only when tiers apply to this grade at all.
fn reachable_tier(
    config: &GradeConfig,
    tier_qty: i64,
    unit: Money,
    tiers: &[PriceTier],
) -> Option<NextTierInfo> {
    if !config.apply_quantity_tiers {
        return None;
    }
    next_tier_info(tier_qty, unit, tiers)
}

fn assemble(
    base: Money,
    unit: Money,
    pairs: i64,
    applied: Option<AppliedTier>,
    reason: String,
    next: Option<NextTierInfo>,
) -> PriceQuote {
    let base_total = base.multiply(pairs);
    let total = unit.multiply(pairs);
    let discount_cents = base_total.amount_cents - total.amount_cents;
    PriceQuote {
        base_price: base_total,
        unit_price: unit,
        total_price: total,
        total_pairs: pairs,
        discount: DiscountBreakdown {
            amount: Money::new(discount_cents, base.currency),
            percentage: percent_of(discount_cents, base_total.amount_cents),
            reason,
        },
        applied_tier: applied,
        next_tier: next,
        savings_vs_full_grade: None,
    }
}

/// Saving against buying the same pairs at the full-grade unit price.
/// Signed: a custom surcharge shows up as negative savings.
fn savings_vs_full(full_unit: Money, unit: Money, pairs: i64) -> Option<Savings> {
    if pairs == 0 {
        return None;
    }
    let baseline_cents = full_unit.amount_cents * pairs;
    let amount_cents = baseline_cents - unit.amount_cents * pairs;
    Some(Savings {
        amount: Money::new(amount_cents, unit.currency),
        percentage: percent_of(amount_cents, baseline_cents),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AttributeTuple, VariationSeed, VariationSet};
    use crate::ids::ProductId;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn grade_variation() -> VariationCombination {
        let mut set = VariationSet::new(ProductId::new("prod-1"));
        let seed = VariationSeed {
            is_grade: true,
            grade_sizes: Some(vec!["38".into(), "39".into(), "40".into()]),
            grade_pairs: Some(vec![4, 4, 4]),
            ..VariationSeed::default()
        };
        set.create(
            AttributeTuple::new(Some("Black"), None::<String>, None::<String>),
            seed,
        );
        set.combinations()[0].clone()
    }

    fn tiered_config() -> GradeConfig {
        GradeConfig {
            apply_quantity_tiers: true,
            ..GradeConfig::default()
        }
    }

    fn table() -> Vec<PriceTier> {
        vec![
            PriceTier::new("Retail", 1, usd(1000)),
            PriceTier::new("Bulk", 10, usd(800)),
            PriceTier::new("Wholesale", 50, usd(600)),
        ]
    }

    #[test]
    fn test_no_config_returns_empty_quote() {
        let variation = grade_variation();
        for mode in [SaleMode::Full, SaleMode::Half, SaleMode::Custom] {
            let q = quote(&variation, None, usd(1000), mode, &table(), None);
            assert_eq!(q.total_pairs, 0);
            assert_eq!(q.unit_price.amount_cents, 1000);
            assert_eq!(q.discount.percentage, 0.0);
        }
    }

    #[test]
    fn test_full_without_tiers() {
        let variation = grade_variation();
        let config = GradeConfig::default();
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Full, &table(), None);

        assert_eq!(q.total_pairs, 12);
        assert_eq!(q.unit_price.amount_cents, 1000);
        assert_eq!(q.total_price.amount_cents, 12_000);
        assert_eq!(q.base_price.amount_cents, 12_000);
        assert_eq!(q.discount.reason, "no discount");
        assert!(q.applied_tier.is_none());
        assert!(q.next_tier.is_none());
    }

    #[test]
    fn test_full_with_tiers() {
        let variation = grade_variation();
        let config = tiered_config();
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Full, &table(), None);

        // 12 pairs land in the Bulk tier.
        assert_eq!(q.unit_price.amount_cents, 800);
        assert_eq!(q.total_price.amount_cents, 9600);
        assert_eq!(q.discount.amount.amount_cents, 2400);
        assert!((q.discount.percentage - 20.0).abs() < 1e-9);
        assert_eq!(q.discount.reason, "Bulk");
        assert_eq!(q.applied_tier.as_ref().unwrap().min_quantity, 10);

        let next = q.next_tier.unwrap();
        assert_eq!(next.tier_name, "Wholesale");
        assert_eq!(next.pairs_needed, 38);
    }

    #[test]
    fn test_full_applies_variation_adjustment() {
        let mut variation = grade_variation();
        variation.price_adjustment = usd(250);
        let config = GradeConfig::default();
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Full, &[], None);
        assert_eq!(q.unit_price.amount_cents, 1250);
    }

    #[test]
    fn test_half_discount_floor() {
        let variation = grade_variation();
        let config = GradeConfig {
            half_grade_discount_percentage: 20.0,
            ..GradeConfig::default()
        };
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Half, &[], None);

        assert_eq!(q.total_pairs, 6);
        assert_eq!(q.unit_price.amount_cents, 800);
        assert_eq!(q.total_price.amount_cents, 4800);
        assert!((q.discount.percentage - 20.0).abs() < 1e-9);
        assert_eq!(q.discount.reason, "half grade discount");

        let savings = q.savings_vs_full_grade.unwrap();
        assert_eq!(savings.amount.amount_cents, 1200);
        assert!((savings.percentage - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_takes_better_of_two_discounts() {
        let variation = grade_variation();
        let config = GradeConfig {
            apply_quantity_tiers: true,
            half_grade_discount_percentage: 10.0,
            ..GradeConfig::default()
        };
        // 6 half pairs reach this tier; its discounted price beats the
        // half-grade price.
        let tiers = vec![PriceTier::new("Assorted", 6, usd(800))];
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Half, &tiers, None);

        // Tier path: 800 * 0.9 = 720, beats 1000 * 0.9 = 900.
        assert_eq!(q.unit_price.amount_cents, 720);
        assert_eq!(q.discount.reason, "Assorted");
        assert!(q.applied_tier.is_some());
    }

    #[test]
    fn test_half_keeps_own_discount_when_tier_is_worse() {
        let variation = grade_variation();
        let config = GradeConfig {
            apply_quantity_tiers: true,
            half_grade_discount_percentage: 10.0,
            ..GradeConfig::default()
        };
        let tiers = vec![PriceTier::new("Assorted", 6, usd(1100))];
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Half, &tiers, None);

        // 1100 * 0.9 = 990 loses to 1000 * 0.9 = 900. No stacking.
        assert_eq!(q.unit_price.amount_cents, 900);
        assert_eq!(q.discount.reason, "half grade discount");
        assert!(q.applied_tier.is_none());
    }

    #[test]
    fn test_half_malformed_grade_data_degrades() {
        let mut variation = grade_variation();
        variation.grade_pairs = Some(vec![4, 4]); // length mismatch
        let config = GradeConfig::default();
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Half, &[], None);

        assert_eq!(q.total_pairs, 0);
        assert_eq!(q.unit_price.amount_cents, 1000);
        assert_eq!(q.discount.percentage, 0.0);
    }

    #[test]
    fn test_custom_adjustment_stacks_on_base() {
        let variation = grade_variation();
        let config = GradeConfig {
            custom_mix_price_adjustment: usd(150),
            ..GradeConfig::default()
        };
        let selection = CustomGradeSelection::new(5);
        let q = quote(
            &variation,
            Some(&config),
            usd(1000),
            SaleMode::Custom,
            &[],
            Some(&selection),
        );

        assert_eq!(q.total_pairs, 5);
        assert_eq!(q.unit_price.amount_cents, 1150);
        assert_eq!(q.total_price.amount_cents, 5750);
        // Surcharge: negative discount against the base total.
        assert_eq!(q.discount.amount.amount_cents, -750);
        assert!((q.discount.percentage + 15.0).abs() < 1e-9);
        assert_eq!(q.discount.reason, "custom mix adjustment");

        let savings = q.savings_vs_full_grade.unwrap();
        assert_eq!(savings.amount.amount_cents, -750);
    }

    #[test]
    fn test_custom_adjustment_stacks_on_tier() {
        let variation = grade_variation();
        let config = GradeConfig {
            apply_quantity_tiers: true,
            custom_mix_price_adjustment: usd(-50),
            ..GradeConfig::default()
        };
        let selection = CustomGradeSelection::new(10);
        let q = quote(
            &variation,
            Some(&config),
            usd(1000),
            SaleMode::Custom,
            &table(),
            Some(&selection),
        );

        // Tier price 800 with the mix adjustment added on top.
        assert_eq!(q.unit_price.amount_cents, 750);
        assert_eq!(q.discount.reason, "Bulk");
        assert_eq!(q.applied_tier.as_ref().unwrap().name, "Bulk");
    }

    #[test]
    fn test_custom_without_selection_degrades() {
        let variation = grade_variation();
        let config = GradeConfig::default();
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Custom, &[], None);

        assert_eq!(q.total_pairs, 0);
        assert_eq!(q.unit_price.amount_cents, 1000);
    }

    #[test]
    fn test_zero_base_price_never_nan() {
        let variation = grade_variation();
        let config = GradeConfig {
            half_grade_discount_percentage: 20.0,
            ..GradeConfig::default()
        };
        for mode in [SaleMode::Full, SaleMode::Half] {
            let q = quote(&variation, Some(&config), usd(0), mode, &[], None);
            assert_eq!(q.discount.percentage, 0.0);
            assert!(!q.discount.percentage.is_nan());
            if let Some(savings) = &q.savings_vs_full_grade {
                assert!(!savings.percentage.is_nan());
            }
        }
    }

    #[test]
    fn test_zero_pairs_never_nan() {
        let mut variation = grade_variation();
        variation.grade_sizes = None;
        variation.grade_pairs = None;
        variation.total_pairs = 0;
        let config = tiered_config();
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Full, &table(), None);

        assert_eq!(q.total_pairs, 0);
        assert!(!q.discount.percentage.is_nan());
        assert!(q.savings_vs_full_grade.is_none());
    }

    #[test]
    fn test_per_grade_tier_counting() {
        let variation = grade_variation(); // 12 pairs, one grade
        let config = GradeConfig {
            apply_quantity_tiers: true,
            tier_calculation_mode: TierCalculationMode::PerGrade,
            ..GradeConfig::default()
        };

        // Threshold of two grades: a single grade does not qualify.
        let high = vec![PriceTier::new("Two grades", 2, usd(700))];
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Full, &high, None);
        assert!(q.applied_tier.is_none());
        assert_eq!(q.unit_price.amount_cents, 1000);

        // Threshold of one grade qualifies.
        let low = vec![PriceTier::new("One grade", 1, usd(700))];
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Full, &low, None);
        assert_eq!(q.unit_price.amount_cents, 700);
    }

    #[test]
    fn test_per_grade_partial_composition_never_qualifies() {
        let variation = grade_variation();
        let config = GradeConfig {
            apply_quantity_tiers: true,
            tier_calculation_mode: TierCalculationMode::PerGrade,
            half_grade_discount_percentage: 10.0,
            ..GradeConfig::default()
        };
        let tiers = vec![PriceTier::new("One grade", 1, usd(500))];
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Half, &tiers, None);

        // 6 of 12 pairs is zero whole grades.
        assert!(q.applied_tier.is_none());
        assert_eq!(q.unit_price.amount_cents, 900);
    }

    #[test]
    fn test_discount_percentage_clamped() {
        let variation = grade_variation();
        let config = GradeConfig {
            half_grade_discount_percentage: 150.0,
            ..GradeConfig::default()
        };
        let q = quote(&variation, Some(&config), usd(1000), SaleMode::Half, &[], None);
        assert_eq!(q.unit_price.amount_cents, 0);
        assert!(!q.discount.percentage.is_nan());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GradeConfig::default();
        config.half_grade_discount_percentage = 50.0;
        assert!(config.validate().is_ok());

        config.half_grade_discount_percentage = -1.0;
        assert!(matches!(
            config.validate(),
            Err(CommerceError::InvalidPercentage(_))
        ));

        config.half_grade_discount_percentage = 150.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_selection_from_pairs() {
        let selection = CustomGradeSelection::from_pairs(&[2, 0, 3]);
        assert_eq!(selection.total_pairs, 5);
    }
}
