//! Attribute value sets.
//!
//! The raw per-axis lists of selectable values (colors, sizes, materials)
//! a seller configures for a product. Order is preserved into generated
//! combinations, so the console shows variants in the order values were
//! entered.

use serde::{Deserialize, Serialize};

/// A variation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeAxis {
    Color,
    Size,
    Material,
}

impl AttributeAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeAxis::Color => "color",
            AttributeAxis::Size => "size",
            AttributeAxis::Material => "material",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AttributeAxis::Color => "Color",
            AttributeAxis::Size => "Size",
            AttributeAxis::Material => "Material",
        }
    }
}

/// The selectable values per axis for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValues {
    colors: Vec<String>,
    sizes: Vec<String>,
    materials: Vec<String>,
}

impl AttributeValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value to an axis. Returns false if the value is already present.
    pub fn add(&mut self, axis: AttributeAxis, value: impl Into<String>) -> bool {
        let value = value.into();
        let list = self.values_mut(axis);
        if list.contains(&value) {
            return false;
        }
        list.push(value);
        true
    }

    /// Remove a value from an axis. Returns false if the value was absent.
    pub fn remove(&mut self, axis: AttributeAxis, value: &str) -> bool {
        let list = self.values_mut(axis);
        let len_before = list.len();
        list.retain(|v| v != value);
        list.len() < len_before
    }

    /// The values configured for an axis.
    pub fn values(&self, axis: AttributeAxis) -> &[String] {
        match axis {
            AttributeAxis::Color => &self.colors,
            AttributeAxis::Size => &self.sizes,
            AttributeAxis::Material => &self.materials,
        }
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    /// Number of axes with at least one value.
    pub fn varied_axes(&self) -> usize {
        [&self.colors, &self.sizes, &self.materials]
            .iter()
            .filter(|list| !list.is_empty())
            .count()
    }

    /// True when no axis has any value.
    pub fn is_empty(&self) -> bool {
        self.varied_axes() == 0
    }

    fn values_mut(&mut self, axis: AttributeAxis) -> &mut Vec<String> {
        match axis {
            AttributeAxis::Color => &mut self.colors,
            AttributeAxis::Size => &mut self.sizes,
            AttributeAxis::Material => &mut self.materials,
        }
    }
}
