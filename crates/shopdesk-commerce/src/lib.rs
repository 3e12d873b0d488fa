//! Product variation and tiered-pricing engine for ShopDesk.
//!
//! This crate holds the pricing-critical core of the seller console:
//!
//! - **Catalog**: attribute value sets and the variation combinator that
//!   expands them into sellable combinations
//! - **Pricing**: quantity tiers, the tier resolver, and the grade price
//!   calculator with its full / half / custom sale modes
//! - **Notify**: the adapter that turns editing outcomes into the
//!   console's success/error signals
//!
//! Everything here is synchronous and deterministic; persistence and UI
//! stay on the platform side, reached through `shopdesk-store` (behind the
//! `storage` feature) and the [`notify::Notifier`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopdesk_commerce::prelude::*;
//!
//! // Expand the configured attributes into sellable combinations.
//! let mut variations = VariationSet::new(product_id);
//! variations.create_all_combinations(&colors, &sizes, &[]);
//!
//! // Quote a half-grade purchase against the product's tier table.
//! let quote = pricing::quote(
//!     &variations.combinations()[0],
//!     Some(&grade_config),
//!     Money::new(4990, Currency::BRL),
//!     SaleMode::Half,
//!     &tiers,
//!     None,
//! );
//! println!("{} per pair", quote.unit_price);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod notify;
pub mod pricing;

#[cfg(feature = "storage")]
pub mod sync;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        AttributeAxis, AttributeTuple, AttributeValues, Statistics, VariationCombination,
        VariationPatch, VariationSeed, VariationSet,
    };

    // Pricing
    pub use crate::pricing::{
        find_applicable_tier, next_tier_info, quote, AppliedTier, CustomGradeSelection,
        DiscountBreakdown, GradeConfig, NextTierInfo, PriceQuote, PriceTier, SaleMode, Savings,
        TierCalculationMode,
    };

    // Notifications
    pub use crate::notify::{Notifier, NullNotifier, VariationEditor};
}
