//! Card placement relative to the axis and canvas edges.
//!
//! # Invariants
//! - Vertical side is a pure function of the render index parity.
//! - Only canvas edges are considered; neighbouring cards may overlap.

use serde::{Deserialize, Serialize};

/// Estimated card width at zoom 1.
pub const CARD_WIDTH: f64 = 320.0;
/// Estimated card height at zoom 1 when the event carries a cover image.
pub const CARD_HEIGHT_WITH_IMAGE: f64 = 320.0;
/// Estimated card height at zoom 1 without a cover image.
pub const CARD_HEIGHT: f64 = 240.0;
/// Distance from either canvas edge a card body must stay clear of.
pub const EDGE_GUARD: f64 = 250.0;

/// Axis position on the 0..100 vertical scale.
pub const AXIS_CENTER: f64 = 50.0;
/// Top/bottom padding on the same 0..100 scale.
pub const CONTAINER_PADDING: f64 = 15.0;
/// Space kept between card and axis.
pub const CONNECTOR_GAP: f64 = 10.0;

/// Horizontal alignment of a card against its marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Card starts at the marker; used near the left edge.
    Left,
    /// Card is centered on the marker.
    Center,
    /// Card ends at the marker; used near the right edge.
    Right,
}

/// Vertical placement tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Above the axis, card tall enough to reach the top padding.
    AboveEdge,
    /// Below the axis, card tall enough to reach the bottom padding.
    BelowEdge,
    AboveNormal,
    BelowNormal,
}

/// Direction of the line joining card and axis marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connector {
    /// Extends down from the card to the axis.
    DownToAxis,
    /// Extends up from the card to the axis.
    UpToAxis,
}

impl Placement {
    pub fn is_above(self) -> bool {
        matches!(self, Self::AboveEdge | Self::AboveNormal)
    }

    pub fn connector(self) -> Connector {
        if self.is_above() {
            Connector::DownToAxis
        } else {
            Connector::UpToAxis
        }
    }
}

/// Card footprint and placement decision for one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardPlacement {
    pub anchor: Anchor,
    pub placement: Placement,
    pub connector: Connector,
    pub card_width: f64,
    pub card_height: f64,
}

/// Even render indexes go above the axis, odd ones below.
pub fn is_above(index: usize) -> bool {
    index % 2 == 0
}

/// Estimated `(width, height)` of a card at `zoom`.
pub fn card_size(has_image: bool, zoom: f64) -> (f64, f64) {
    let height = if has_image {
        CARD_HEIGHT_WITH_IMAGE
    } else {
        CARD_HEIGHT
    };
    (CARD_WIDTH * zoom, height * zoom)
}

/// Picks the horizontal anchor keeping a card inside the canvas.
///
/// Left overflow wins when a card would overflow both edges.
pub fn anchor_for(pixel_x: f64, card_width: f64, canvas_width: f64) -> Anchor {
    let half = card_width / 2.0;
    if pixel_x - half < EDGE_GUARD {
        Anchor::Left
    } else if pixel_x + half > canvas_width - EDGE_GUARD {
        Anchor::Right
    } else {
        Anchor::Center
    }
}

/// Tags the vertical placement for a card of `card_height`.
pub fn placement_for(above: bool, card_height: f64) -> Placement {
    let reach = card_height / 2.0 + CONNECTOR_GAP;
    if above {
        if AXIS_CENTER - reach < CONTAINER_PADDING {
            Placement::AboveEdge
        } else {
            Placement::AboveNormal
        }
    } else if AXIS_CENTER + reach > 100.0 - CONTAINER_PADDING {
        Placement::BelowEdge
    } else {
        Placement::BelowNormal
    }
}

/// Full placement decision for the event rendered at `index`.
pub fn place_card(
    index: usize,
    pixel_x: f64,
    canvas_width: f64,
    has_image: bool,
    zoom: f64,
) -> CardPlacement {
    let (card_width, card_height) = card_size(has_image, zoom);
    let placement = placement_for(is_above(index), card_height);
    CardPlacement {
        anchor: anchor_for(pixel_x, card_width, canvas_width),
        placement,
        connector: placement.connector(),
        card_width,
        card_height,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        anchor_for, card_size, is_above, place_card, placement_for, Anchor, Connector, Placement,
    };

    #[test]
    fn alternates_by_index_parity() {
        let sides: Vec<bool> = (0..6).map(is_above).collect();
        assert_eq!(sides, [true, false, true, false, true, false]);
    }

    #[test]
    fn card_size_scales_with_zoom() {
        assert_eq!(card_size(false, 1.0), (320.0, 240.0));
        assert_eq!(card_size(true, 0.5), (160.0, 160.0));
    }

    #[test]
    fn anchors_follow_edge_proximity() {
        let canvas = 3960.0;
        assert_eq!(anchor_for(200.0, 320.0, canvas), Anchor::Left);
        assert_eq!(anchor_for(409.0, 320.0, canvas), Anchor::Left);
        assert_eq!(anchor_for(410.0, 320.0, canvas), Anchor::Center);
        assert_eq!(anchor_for(3550.0, 320.0, canvas), Anchor::Center);
        assert_eq!(anchor_for(3551.0, 320.0, canvas), Anchor::Right);
    }

    #[test]
    fn tall_cards_hit_the_container_padding() {
        assert_eq!(placement_for(true, 240.0), Placement::AboveEdge);
        assert_eq!(placement_for(false, 240.0), Placement::BelowEdge);
        assert_eq!(placement_for(true, 20.0), Placement::AboveNormal);
        assert_eq!(placement_for(false, 20.0), Placement::BelowNormal);
        // 50 - 25 - 10 == 15 is not a collision.
        assert_eq!(placement_for(true, 50.0), Placement::AboveNormal);
    }

    #[test]
    fn connectors_point_toward_the_axis() {
        assert_eq!(Placement::AboveEdge.connector(), Connector::DownToAxis);
        assert_eq!(Placement::AboveNormal.connector(), Connector::DownToAxis);
        assert_eq!(Placement::BelowEdge.connector(), Connector::UpToAxis);
        assert_eq!(Placement::BelowNormal.connector(), Connector::UpToAxis);
    }

    #[test]
    fn place_card_combines_side_anchor_and_size() {
        let card = place_card(1, 3800.0, 3960.0, true, 1.0);
        assert_eq!(card.anchor, Anchor::Right);
        assert_eq!(card.placement, Placement::BelowEdge);
        assert_eq!(card.connector, Connector::UpToAxis);
        assert_eq!(card.card_height, 320.0);
    }
}
