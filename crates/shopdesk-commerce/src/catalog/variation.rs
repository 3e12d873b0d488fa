//! Variation combinations and the combinator that maintains them.
//!
//! A product's configured attribute values expand into concrete sellable
//! combinations, one per distinct `(color, size, material)` tuple. The
//! `VariationSet` owns the collection for a single product-edit session:
//! callers read immutable snapshots and mutate only through the operations
//! here, which keep the tuple-uniqueness invariant.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{CombinationId, ProductId};
use crate::money::Money;

/// One selected value per attribute axis.
///
/// An unset axis is a fixed part of the identity, not a wildcard: `(Red,
/// None, None)` and `(Red, P, None)` are different combinations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeTuple {
    pub color: Option<String>,
    pub size: Option<String>,
    pub material: Option<String>,
}

impl AttributeTuple {
    pub fn new(
        color: Option<impl Into<String>>,
        size: Option<impl Into<String>>,
        material: Option<impl Into<String>>,
    ) -> Self {
        Self {
            color: color.map(Into::into),
            size: size.map(Into::into),
            material: material.map(Into::into),
        }
    }

    /// Human-readable label, e.g. "Red / P". "Default" when no axis is set.
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [&self.color, &self.size, &self.material]
            .iter()
            .filter_map(|v| v.as_deref())
            .collect();
        if parts.is_empty() {
            "Default".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

/// A concrete sellable combination of attribute values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationCombination {
    /// Unique combination identifier.
    pub id: CombinationId,
    /// Selected color, if the product varies by color.
    pub color: Option<String>,
    /// Selected size, if the product varies by size.
    pub size: Option<String>,
    /// Selected material, if the product varies by material.
    pub material: Option<String>,
    /// Units on hand. Never negative.
    pub stock: i64,
    /// Signed amount added to the product's base unit price.
    pub price_adjustment: Money,
    /// Whether the combination is offered for sale.
    pub is_active: bool,
    /// Stock keeping unit. Free-form, not guaranteed unique.
    pub sku: String,
    /// Whether this combination is a grade (a bundle of size/pair counts).
    pub is_grade: bool,
    /// Size labels of the grade composition, parallel to `grade_pairs`.
    pub grade_sizes: Option<Vec<String>>,
    /// Pair count per size, parallel to `grade_sizes`.
    pub grade_pairs: Option<Vec<i64>>,
    /// Total pairs in the grade. Equals `sum(grade_pairs)` when the lists
    /// are present.
    pub total_pairs: i64,
}

impl VariationCombination {
    /// Exact match against an attribute tuple.
    pub fn matches(&self, tuple: &AttributeTuple) -> bool {
        self.color == tuple.color && self.size == tuple.size && self.material == tuple.material
    }

    /// The combination's attribute tuple.
    pub fn tuple(&self) -> AttributeTuple {
        AttributeTuple {
            color: self.color.clone(),
            size: self.size.clone(),
            material: self.material.clone(),
        }
    }

    /// Human-readable label for notifications and lists.
    pub fn label(&self) -> String {
        self.tuple().label()
    }

    /// Total pairs of the grade: the pair list sum when present, else the
    /// stored total.
    pub fn grade_total_pairs(&self) -> i64 {
        match &self.grade_pairs {
            Some(pairs) => pairs.iter().sum(),
            None => self.total_pairs,
        }
    }

    /// Pairs in the half composition: per-size halves, odd counts rounded
    /// up. `None` when the grade lists are absent or inconsistent.
    pub fn half_composition_pairs(&self) -> Option<i64> {
        let sizes = self.grade_sizes.as_ref()?;
        let pairs = self.grade_pairs.as_ref()?;
        if sizes.len() != pairs.len() {
            return None;
        }
        Some(pairs.iter().map(|p| (p + 1) / 2).sum())
    }
}

/// Caller-supplied overrides for a new combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariationSeed {
    pub stock: Option<i64>,
    pub price_adjustment: Option<Money>,
    pub is_active: Option<bool>,
    pub sku: Option<String>,
    pub is_grade: bool,
    pub grade_sizes: Option<Vec<String>>,
    pub grade_pairs: Option<Vec<i64>>,
    pub total_pairs: Option<i64>,
}

/// Partial update for an existing combination. `None` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariationPatch {
    pub stock: Option<i64>,
    pub price_adjustment: Option<Money>,
    pub is_active: Option<bool>,
    pub sku: Option<String>,
}

/// Summary counts over a combination set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub with_stock: usize,
    pub without_stock: usize,
    pub total_stock: i64,
    pub average_stock: f64,
    pub positive_adjustments: usize,
    pub negative_adjustments: usize,
    pub neutral_adjustments: usize,
}

/// The combination set for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationSet {
    product: ProductId,
    combinations: Vec<VariationCombination>,
}

impl VariationSet {
    /// Create an empty set for a product.
    pub fn new(product: ProductId) -> Self {
        Self {
            product,
            combinations: Vec::new(),
        }
    }

    /// Rebuild a set from stored combinations.
    pub fn from_combinations(
        product: ProductId,
        combinations: Vec<VariationCombination>,
    ) -> Self {
        Self {
            product,
            combinations,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product
    }

    /// Immutable snapshot of the current combinations.
    pub fn combinations(&self) -> &[VariationCombination] {
        &self.combinations
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Exact-match lookup by attribute tuple.
    pub fn exists(&self, tuple: &AttributeTuple) -> bool {
        self.combinations.iter().any(|c| c.matches(tuple))
    }

    /// Find a combination by tuple.
    pub fn find(&self, tuple: &AttributeTuple) -> Option<&VariationCombination> {
        self.combinations.iter().find(|c| c.matches(tuple))
    }

    /// Find a combination by id.
    pub fn get(&self, id: &CombinationId) -> Option<&VariationCombination> {
        self.combinations.iter().find(|c| &c.id == id)
    }

    /// Combinations currently offered for sale.
    pub fn active_combinations(&self) -> impl Iterator<Item = &VariationCombination> {
        self.combinations.iter().filter(|c| c.is_active)
    }

    /// Units on hand across all combinations.
    pub fn total_stock(&self) -> i64 {
        self.combinations.iter().map(|c| c.stock).sum()
    }

    /// Create a combination for a tuple. Boolean surface over `try_create`.
    pub fn create(&mut self, tuple: AttributeTuple, seed: VariationSeed) -> bool {
        self.try_create(tuple, seed).is_ok()
    }

    /// Create a combination for a tuple, reporting the failure cause.
    ///
    /// Fails with `DuplicateCombination` when the tuple is already present,
    /// `InvalidQuantity` on a negative seed stock, and `Validation` when the
    /// seed's grade lists are inconsistent.
    pub fn try_create(
        &mut self,
        tuple: AttributeTuple,
        seed: VariationSeed,
    ) -> Result<CombinationId, CommerceError> {
        if self.exists(&tuple) {
            return Err(CommerceError::DuplicateCombination(tuple.label()));
        }
        if let Some(stock) = seed.stock {
            if stock < 0 {
                return Err(CommerceError::InvalidQuantity(stock));
            }
        }

        let total_pairs = match (&seed.grade_pairs, seed.total_pairs) {
            (Some(pairs), Some(total)) => {
                let sum: i64 = pairs.iter().sum();
                if sum != total {
                    return Err(CommerceError::Validation(format!(
                        "grade pairs sum to {sum}, total_pairs says {total}"
                    )));
                }
                total
            }
            (Some(pairs), None) => pairs.iter().sum(),
            (None, Some(total)) => total,
            (None, None) => 0,
        };
        if let (Some(sizes), Some(pairs)) = (&seed.grade_sizes, &seed.grade_pairs) {
            if sizes.len() != pairs.len() {
                return Err(CommerceError::Validation(format!(
                    "{} grade sizes but {} pair counts",
                    sizes.len(),
                    pairs.len()
                )));
            }
        }

        let sku = seed.sku.unwrap_or_else(|| tuple.label());
        let combination = VariationCombination {
            id: CombinationId::generate(),
            color: tuple.color,
            size: tuple.size,
            material: tuple.material,
            stock: seed.stock.unwrap_or(0),
            price_adjustment: seed.price_adjustment.unwrap_or_default(),
            is_active: seed.is_active.unwrap_or(true),
            sku,
            is_grade: seed.is_grade,
            grade_sizes: seed.grade_sizes,
            grade_pairs: seed.grade_pairs,
            total_pairs,
        };
        let id = combination.id.clone();
        self.combinations.push(combination);
        Ok(id)
    }

    /// Remove the first combination matching a tuple. Boolean surface.
    pub fn remove(&mut self, tuple: &AttributeTuple) -> bool {
        self.try_remove(tuple).is_ok()
    }

    /// Remove the first combination matching a tuple, reporting the cause.
    pub fn try_remove(&mut self, tuple: &AttributeTuple) -> Result<(), CommerceError> {
        match self.combinations.iter().position(|c| c.matches(tuple)) {
            Some(index) => {
                self.combinations.remove(index);
                Ok(())
            }
            None => Err(CommerceError::CombinationNotFound(tuple.label())),
        }
    }

    /// Remove the tuple if present, create it (default seed) if absent.
    /// Returns whether the combination is present after the flip.
    pub fn toggle(&mut self, tuple: AttributeTuple) -> bool {
        if self.exists(&tuple) {
            self.remove(&tuple);
            false
        } else {
            self.create(tuple, VariationSeed::default());
            true
        }
    }

    /// Merge a patch into the combination with the given id. Boolean surface.
    pub fn update(&mut self, id: &CombinationId, patch: VariationPatch) -> bool {
        self.try_update(id, patch).is_ok()
    }

    /// Merge a patch into the combination with the given id.
    pub fn try_update(
        &mut self,
        id: &CombinationId,
        patch: VariationPatch,
    ) -> Result<(), CommerceError> {
        if let Some(stock) = patch.stock {
            if stock < 0 {
                return Err(CommerceError::InvalidQuantity(stock));
            }
        }
        let Some(combination) = self.combinations.iter_mut().find(|c| &c.id == id) else {
            return Err(CommerceError::UnknownCombinationId(id.to_string()));
        };
        if let Some(stock) = patch.stock {
            combination.stock = stock;
        }
        if let Some(adjustment) = patch.price_adjustment {
            combination.price_adjustment = adjustment;
        }
        if let Some(active) = patch.is_active {
            combination.is_active = active;
        }
        if let Some(sku) = patch.sku {
            combination.sku = sku;
        }
        Ok(())
    }

    /// Generate every combination of the supplied value lists.
    ///
    /// An empty list collapses its axis (the axis is not varied). When only
    /// one axis has values, combinations are generated along that axis
    /// alone. Tuples already present are skipped. Returns the number of
    /// combinations actually created; 0 when all three lists are empty.
    pub fn create_all_combinations(
        &mut self,
        colors: &[String],
        sizes: &[String],
        materials: &[String],
    ) -> usize {
        let varied = [colors, sizes, materials]
            .iter()
            .filter(|list| !list.is_empty())
            .count();
        if varied == 0 {
            return 0;
        }

        let mut created = 0;
        if varied == 1 {
            // Single varied axis: walk it directly.
            for color in colors {
                created += self.create_missing(AttributeTuple::new(
                    Some(color.clone()),
                    None::<String>,
                    None::<String>,
                ));
            }
            for size in sizes {
                created += self.create_missing(AttributeTuple::new(
                    None::<String>,
                    Some(size.clone()),
                    None::<String>,
                ));
            }
            for material in materials {
                created += self.create_missing(AttributeTuple::new(
                    None::<String>,
                    None::<String>,
                    Some(material.clone()),
                ));
            }
            return created;
        }

        let color_slots = axis_slots(colors);
        let size_slots = axis_slots(sizes);
        let material_slots = axis_slots(materials);
        for color in &color_slots {
            for size in &size_slots {
                for material in &material_slots {
                    created += self.create_missing(AttributeTuple {
                        color: color.clone(),
                        size: size.clone(),
                        material: material.clone(),
                    });
                }
            }
        }
        created
    }

    /// Generate from an [`AttributeValues`](crate::catalog::AttributeValues)
    /// instead of raw lists.
    pub fn create_all_from(&mut self, values: &crate::catalog::AttributeValues) -> usize {
        self.create_all_combinations(values.colors(), values.sizes(), values.materials())
    }

    /// Empty the set unconditionally.
    pub fn clear(&mut self) {
        self.combinations.clear();
    }

    /// Set `is_active` on every combination.
    pub fn set_all_active(&mut self, active: bool) {
        for combination in &mut self.combinations {
            combination.is_active = active;
        }
    }

    /// Set stock on every combination. With `only_empty`, combinations that
    /// already hold stock are left untouched.
    pub fn apply_bulk_stock(&mut self, stock: i64, only_empty: bool) {
        let stock = stock.max(0);
        for combination in &mut self.combinations {
            if only_empty && combination.stock > 0 {
                continue;
            }
            combination.stock = stock;
        }
    }

    /// Set the price adjustment uniformly on every combination.
    pub fn apply_bulk_price_adjustment(&mut self, value: Money) {
        for combination in &mut self.combinations {
            combination.price_adjustment = value;
        }
    }

    /// Summary counts for the console dashboard.
    pub fn statistics(&self) -> Statistics {
        let total = self.combinations.len();
        let active = self.combinations.iter().filter(|c| c.is_active).count();
        let with_stock = self.combinations.iter().filter(|c| c.stock > 0).count();
        let total_stock = self.total_stock();
        let average_stock = if total == 0 {
            0.0
        } else {
            total_stock as f64 / total as f64
        };
        let positive = self
            .combinations
            .iter()
            .filter(|c| c.price_adjustment.is_positive())
            .count();
        let negative = self
            .combinations
            .iter()
            .filter(|c| c.price_adjustment.is_negative())
            .count();

        Statistics {
            total,
            active,
            inactive: total - active,
            with_stock,
            without_stock: total - with_stock,
            total_stock,
            average_stock,
            positive_adjustments: positive,
            negative_adjustments: negative,
            neutral_adjustments: total - positive - negative,
        }
    }

    fn create_missing(&mut self, tuple: AttributeTuple) -> usize {
        if self.exists(&tuple) {
            0
        } else {
            usize::from(self.create(tuple, VariationSeed::default()))
        }
    }
}

/// Axis values as option slots; an empty axis collapses to a single unset slot.
fn axis_slots(values: &[String]) -> Vec<Option<String>> {
    if values.is_empty() {
        vec![None]
    } else {
        values.iter().map(|v| Some(v.clone())).collect()
    }
}
