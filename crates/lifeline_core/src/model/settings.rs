//! Per-user view settings persisted as one JSON document.

use crate::model::category::CustomCategory;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Background image shown behind the timeline.
    pub background_url: Option<String>,
    /// User-defined categories keyed by category key, insertion ordered.
    pub custom_categories: IndexMap<String, CustomCategory>,
}
