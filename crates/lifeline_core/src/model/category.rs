//! Event category configuration.
//!
//! # Responsibility
//! - Define the built-in category set.
//! - Merge user overrides onto the defaults in a stable order.
//!
//! # Invariants
//! - Defaults keep their declaration order; new custom keys append in
//!   insertion order.
//! - A custom category inherits its color from `base_category`, falling back
//!   to `milestone` when the base is unknown.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Upper bound on merged category count.
pub const MAX_CATEGORIES: usize = 10;

/// Fallback key for unknown categories.
pub const FALLBACK_CATEGORY: &str = "milestone";

/// Resolved category as consumed by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub label: String,
    /// Color token understood by the render surface.
    pub color: String,
}

/// User-defined category layered on top of a built-in one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCategory {
    pub label: String,
    pub base_category: String,
}

/// Ordered category map keyed by category key.
pub type CategoryMap = IndexMap<String, Category>;

const DEFAULTS: &[(&str, &str, &str)] = &[
    ("milestone", "Milestone", "red"),
    ("education", "Education", "blue"),
    ("career", "Career", "green"),
    ("relationship", "Relationship", "pink"),
    ("birthday", "Birthday", "purple"),
    ("family", "Family", "orange"),
];

/// Returns the built-in categories in display order.
pub fn default_categories() -> CategoryMap {
    DEFAULTS
        .iter()
        .map(|(key, label, color)| {
            (
                (*key).to_string(),
                Category {
                    key: (*key).to_string(),
                    label: (*label).to_string(),
                    color: (*color).to_string(),
                },
            )
        })
        .collect()
}

/// Merges custom overrides onto `defaults`.
///
/// An override whose key already exists replaces that entry in place.
pub fn merge_categories(
    defaults: &CategoryMap,
    overrides: &IndexMap<String, CustomCategory>,
) -> CategoryMap {
    let mut merged = defaults.clone();
    for (key, custom) in overrides {
        let color = defaults
            .get(custom.base_category.as_str())
            .or_else(|| defaults.get(FALLBACK_CATEGORY))
            .map(|base| base.color.clone())
            .unwrap_or_default();
        merged.insert(
            key.clone(),
            Category {
                key: key.clone(),
                label: custom.label.clone(),
                color,
            },
        );
    }
    merged
}
