//! Caller-owned view state threaded into every layout pass.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_ZOOM: f64 = 1.0;
pub const MIN_ZOOM: f64 = 0.3;
pub const MAX_ZOOM: f64 = 5.0;
/// Multiplicative step for one zoom-in/zoom-out action.
pub const ZOOM_STEP: f64 = 1.5;

const BASE_LABEL_FONT_PX: f64 = 12.0;
const MIN_LABEL_FONT_PX: u32 = 10;
const MAX_LABEL_FONT_PX: u32 = 24;

/// Zoom and category filter for one render pass.
///
/// `selected_categories == None` shows every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub zoom: f64,
    pub selected_categories: Option<BTreeSet<String>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            selected_categories: None,
        }
    }
}

impl ViewState {
    /// Creates a view; a non-positive or non-finite zoom falls back to 1.
    pub fn new(zoom: f64, selected_categories: Option<BTreeSet<String>>) -> Self {
        Self {
            zoom: usable_zoom(zoom),
            selected_categories,
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom = zoom_in(self.zoom);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = zoom_out(self.zoom);
    }

    /// Whether events of `category` pass the filter.
    pub fn includes(&self, category: &str) -> bool {
        self.selected_categories
            .as_ref()
            .map_or(true, |selected| selected.contains(category))
    }
}

/// `zoom` when it is finite and positive, otherwise the default zoom.
///
/// Applied to every zoom entering the layout, including `ViewState`s built
/// by struct literal or deserialization.
pub fn usable_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > 0.0 {
        zoom
    } else {
        DEFAULT_ZOOM
    }
}

/// `min(zoom * 1.5, 5)`.
pub fn zoom_in(zoom: f64) -> f64 {
    (zoom * ZOOM_STEP).min(MAX_ZOOM)
}

/// `max(zoom / 1.5, 0.3)`.
pub fn zoom_out(zoom: f64) -> f64 {
    (zoom / ZOOM_STEP).max(MIN_ZOOM)
}

/// Axis label font size: `round(12 * zoom)` clamped to `[10, 24]`.
pub fn label_font_px(zoom: f64) -> u32 {
    let scaled = (BASE_LABEL_FONT_PX * usable_zoom(zoom)).round();
    if scaled <= f64::from(MIN_LABEL_FONT_PX) {
        return MIN_LABEL_FONT_PX;
    }
    if scaled >= f64::from(MAX_LABEL_FONT_PX) {
        return MAX_LABEL_FONT_PX;
    }
    scaled as u32
}
