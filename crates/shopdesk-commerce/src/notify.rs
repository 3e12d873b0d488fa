//! Notification adapter over the variation editing surface.
//!
//! The engine core stays pure: editing operations return booleans or typed
//! errors. The console's toast plumbing implements [`Notifier`] and the
//! [`VariationEditor`] wrapper forwards each outcome as a success or error
//! signal, leaving the underlying return value unchanged.

use crate::catalog::{AttributeTuple, VariationPatch, VariationSeed, VariationSet};
use crate::ids::CombinationId;
use crate::money::Money;

/// A sink for user-facing success and error signals.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards every signal. For headless callers and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Editing facade that notifies on every operation.
pub struct VariationEditor<'a, N: Notifier> {
    set: &'a mut VariationSet,
    notifier: &'a N,
}

impl<'a, N: Notifier> VariationEditor<'a, N> {
    pub fn new(set: &'a mut VariationSet, notifier: &'a N) -> Self {
        Self { set, notifier }
    }

    /// Create a combination, signalling the outcome.
    pub fn create(&mut self, tuple: AttributeTuple, seed: VariationSeed) -> bool {
        let label = tuple.label();
        match self.set.try_create(tuple, seed) {
            Ok(_) => {
                self.notifier
                    .success(&format!("Variation {label} created"));
                true
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                false
            }
        }
    }

    /// Remove a combination, signalling the outcome.
    pub fn remove(&mut self, tuple: &AttributeTuple) -> bool {
        match self.set.try_remove(tuple) {
            Ok(()) => {
                self.notifier
                    .success(&format!("Variation {} removed", tuple.label()));
                true
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                false
            }
        }
    }

    /// Flip a combination's presence. Returns whether it is present after.
    pub fn toggle(&mut self, tuple: AttributeTuple) -> bool {
        let label = tuple.label();
        let present = self.set.toggle(tuple);
        if present {
            self.notifier.success(&format!("Variation {label} added"));
        } else {
            self.notifier
                .success(&format!("Variation {label} removed"));
        }
        present
    }

    /// Merge a patch into a combination by id.
    pub fn update(&mut self, id: &CombinationId, patch: VariationPatch) -> bool {
        match self.set.try_update(id, patch) {
            Ok(()) => {
                self.notifier.success("Variation updated");
                true
            }
            Err(err) => {
                self.notifier.error(&err.to_string());
                false
            }
        }
    }

    /// Generate the full cartesian set from the value lists.
    pub fn create_all(
        &mut self,
        colors: &[String],
        sizes: &[String],
        materials: &[String],
    ) -> usize {
        let created = self.set.create_all_combinations(colors, sizes, materials);
        if created > 0 {
            self.notifier
                .success(&format!("{created} variations generated"));
        } else {
            self.notifier.error("No new combinations to generate");
        }
        created
    }

    /// Remove every combination.
    pub fn clear(&mut self) {
        self.set.clear();
        self.notifier.success("All variations removed");
    }

    /// Activate or deactivate every combination.
    pub fn set_all_active(&mut self, active: bool) {
        self.set.set_all_active(active);
        if active {
            self.notifier.success("All variations activated");
        } else {
            self.notifier.success("All variations deactivated");
        }
    }

    /// Apply stock across the set.
    pub fn apply_bulk_stock(&mut self, stock: i64, only_empty: bool) {
        self.set.apply_bulk_stock(stock, only_empty);
        self.notifier.success("Stock applied to variations");
    }

    /// Apply a uniform price adjustment across the set.
    pub fn apply_bulk_price_adjustment(&mut self, value: Money) {
        self.set.apply_bulk_price_adjustment(value);
        self.notifier.success("Price adjustment applied to variations");
    }
}
