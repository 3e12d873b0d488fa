//! Snapshot handoff to the persistence boundary.
//!
//! The combinator owns its collection for the length of an edit session;
//! saving replays the whole snapshot into the row store, one row per
//! combination, scoped to the product. Conflicting sessions resolve
//! last-write-wins at the store.

use shopdesk_store::{RowStore, StoreError};

use crate::catalog::{VariationCombination, VariationSet};
use crate::ids::ProductId;

/// Replace the product's stored rows with the set's current combinations.
pub fn save_variations<S: RowStore>(store: &mut S, set: &VariationSet) -> Result<(), StoreError> {
    let scope = set.product_id().as_str();
    store.clear_scope(scope)?;
    for combination in set.combinations() {
        store.upsert(scope, combination.id.as_str(), combination)?;
    }
    Ok(())
}

/// Rebuild a variation set from the product's stored rows.
pub fn load_variations<S: RowStore>(
    store: &S,
    product: &ProductId,
) -> Result<VariationSet, StoreError> {
    let rows: Vec<VariationCombination> = store.load_scope(product.as_str())?;
    Ok(VariationSet::from_combinations(product.clone(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AttributeTuple, VariationPatch, VariationSeed};
    use shopdesk_store::MemoryStore;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_round_trip() {
        let mut set = VariationSet::new(ProductId::new("prod-1"));
        set.create_all_combinations(&strings(&["Red", "Blue"]), &strings(&["P", "M"]), &[]);

        let mut store = MemoryStore::new();
        save_variations(&mut store, &set).unwrap();

        let loaded = load_variations(&store, &ProductId::new("prod-1")).unwrap();
        assert_eq!(loaded.len(), 4);
        for combination in set.combinations() {
            assert!(loaded.exists(&combination.tuple()));
        }
    }

    #[test]
    fn test_save_replaces_stale_rows() {
        let mut set = VariationSet::new(ProductId::new("prod-1"));
        set.create(
            AttributeTuple::new(Some("Red"), None::<String>, None::<String>),
            VariationSeed::default(),
        );

        let mut store = MemoryStore::new();
        save_variations(&mut store, &set).unwrap();

        // Drop the combination and save again; the stale row must go.
        set.clear();
        set.create(
            AttributeTuple::new(Some("Blue"), None::<String>, None::<String>),
            VariationSeed::default(),
        );
        save_variations(&mut store, &set).unwrap();

        let loaded = load_variations(&store, &ProductId::new("prod-1")).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.exists(&AttributeTuple::new(
            Some("Blue"),
            None::<String>,
            None::<String>
        )));
    }

    #[test]
    fn test_loaded_set_stays_editable() {
        let mut set = VariationSet::new(ProductId::new("prod-1"));
        set.create(
            AttributeTuple::new(Some("Red"), None::<String>, None::<String>),
            VariationSeed::default(),
        );

        let mut store = MemoryStore::new();
        save_variations(&mut store, &set).unwrap();

        let mut loaded = load_variations(&store, &ProductId::new("prod-1")).unwrap();
        let id = loaded.combinations()[0].id.clone();
        assert!(loaded.update(
            &id,
            VariationPatch {
                stock: Some(4),
                ..VariationPatch::default()
            }
        ));
        assert_eq!(loaded.total_stock(), 4);
    }
}
