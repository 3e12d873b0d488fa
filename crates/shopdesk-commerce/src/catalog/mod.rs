//! Catalog types: attribute value sets and sellable variations.

mod attributes;
mod variation;

pub use attributes::{AttributeAxis, AttributeValues};
pub use variation::{
    AttributeTuple, Statistics, VariationCombination, VariationPatch, VariationSeed, VariationSet,
};
