//! Timeline layout engine.
//!
//! # Responsibility
//! - Map dated events onto an elastic horizontal canvas.
//! - Decide card side and anchor so cards stay inside the canvas.
//! - Compute each event's age relative to the earliest event.
//!
//! # Invariants
//! - Pure: output depends only on the event list and `ViewState`.
//! - `pixel_x` is non-decreasing along the date-sorted sequence.
//! - Above/below alternates by index in the filtered sequence.
//! - Same-date events share `pixel_x`; card-to-card overlap is not resolved.

pub mod age;
pub mod geometry;
pub mod placement;
pub mod view;

use crate::model::event::{Event, EventId};
use age::age_at;
use geometry::{canvas_width, drawing_width, pixel_x, TimelineSpan, CANVAS_PADDING};
use log::debug;
use placement::{place_card, Anchor, Connector, Placement};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use view::{label_font_px, usable_zoom, ViewState};

/// Placement data for one rendered event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLayout {
    pub event_id: EventId,
    /// Position in the filtered, date-sorted sequence.
    pub index: usize,
    pub pixel_x: f64,
    pub is_above: bool,
    pub placement: Placement,
    pub connector: Connector,
    pub anchor: Anchor,
    /// Whole years since the earliest event on the timeline.
    pub age: i32,
    pub card_width: f64,
    pub card_height: f64,
    pub importance: u8,
}

/// Axis tick for one year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearMarker {
    pub year: i32,
    pub pixel_x: f64,
    pub font_px: u32,
}

/// Everything a renderer needs to draw one timeline pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub span: TimelineSpan,
    pub total_years: u32,
    pub zoom: f64,
    pub canvas_width: f64,
    pub year_markers: Vec<YearMarker>,
    pub events: Vec<EventLayout>,
}

/// Lays out `events` for one render pass.
///
/// Events may arrive in any order; they are stably sorted by date first.
/// The span and the age origin come from the full list, while only events
/// passing `view`'s category filter are placed. Returns `None` for an empty
/// list so callers can render an empty state.
pub fn layout_timeline(events: &[Event], view: &ViewState) -> Option<TimelineLayout> {
    let started_at = Instant::now();

    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by_key(|event| event.date);

    let first_date = ordered.first()?.date;
    let span = TimelineSpan::from_dates(ordered.iter().map(|event| event.date))?;
    let total_years = span.total_years();
    let zoom = usable_zoom(view.zoom);
    let canvas = canvas_width(total_years, zoom);

    let placed = ordered
        .into_iter()
        .filter(|event| view.includes(&event.category))
        .enumerate()
        .map(|(index, event)| {
            let x = pixel_x(event.date, &span, zoom);
            let card = place_card(index, x, canvas, event.has_image(), zoom);
            EventLayout {
                event_id: event.uuid,
                index,
                pixel_x: x,
                is_above: card.placement.is_above(),
                placement: card.placement,
                connector: card.connector,
                anchor: card.anchor,
                age: age_at(event.date, first_date),
                card_width: card.card_width,
                card_height: card.card_height,
                importance: event.effective_importance(),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "event=timeline_layout module=layout status=ok total={} placed={} total_years={} duration_us={}",
        events.len(),
        placed.len(),
        total_years,
        started_at.elapsed().as_micros()
    );

    Some(TimelineLayout {
        span,
        total_years,
        zoom,
        canvas_width: canvas,
        year_markers: year_markers(&span, zoom),
        events: placed,
    })
}

/// Axis ticks at every year boundary, `total_years + 1` in all.
pub fn year_markers(span: &TimelineSpan, zoom: f64) -> Vec<YearMarker> {
    let zoom = usable_zoom(zoom);
    let total_years = span.total_years();
    let width = drawing_width(canvas_width(total_years, zoom));
    let font_px = label_font_px(zoom);
    (0..=total_years)
        .map(|offset| YearMarker {
            year: span.start_year.saturating_add(offset as i32),
            pixel_x: CANVAS_PADDING + f64::from(offset) / f64::from(total_years) * width,
            font_px,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{layout_timeline, year_markers};
    use crate::layout::geometry::TimelineSpan;
    use crate::layout::placement::Anchor;
    use crate::layout::view::ViewState;
    use crate::model::event::Event;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn event(y: i32, m: u32, d: u32, category: &str) -> Event {
        Event::new(
            Uuid::nil(),
            format!("{y}-{m}-{d}"),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            category,
        )
    }

    #[test]
    fn empty_input_yields_no_layout() {
        assert!(layout_timeline(&[], &ViewState::default()).is_none());
    }

    #[test]
    fn single_event_collapses_span_to_one_year() {
        let layout = layout_timeline(&[event(2015, 1, 20, "career")], &ViewState::default())
            .expect("layout for one event");
        assert_eq!(layout.total_years, 1);
        assert_relative_eq!(layout.canvas_width, 1400.0);
        let only = &layout.events[0];
        assert!(only.pixel_x.is_finite());
        assert_relative_eq!(only.pixel_x, 200.0);
        assert_eq!(only.anchor, Anchor::Left);
        assert_eq!(only.age, 0);
    }

    #[test]
    fn sorts_unordered_input_and_keeps_pixel_x_monotonic() {
        let events = vec![
            event(2010, 6, 1, "career"),
            event(1999, 2, 1, "education"),
            event(2010, 6, 20, "family"),
            event(2004, 11, 30, "career"),
        ];
        let layout = layout_timeline(&events, &ViewState::default()).unwrap();
        let xs: Vec<f64> = layout.events.iter().map(|e| e.pixel_x).collect();
        assert!(xs.windows(2).all(|pair| pair[0] <= pair[1]));
        // Same month collapses to the same x.
        assert_relative_eq!(xs[2], xs[3]);
    }

    #[test]
    fn filter_reindexes_but_span_and_age_use_all_events() {
        let events = vec![
            event(1990, 3, 15, "birthday"),
            event(2000, 3, 14, "career"),
            event(2005, 1, 1, "family"),
            event(2010, 8, 1, "career"),
        ];
        let view = ViewState::new(1.0, Some(BTreeSet::from(["career".to_string()])));
        let layout = layout_timeline(&events, &view).unwrap();

        assert_eq!(layout.span.start_year, 1990);
        assert_eq!(layout.events.len(), 2);
        assert_eq!(layout.events[0].index, 0);
        assert!(layout.events[0].is_above);
        assert!(!layout.events[1].is_above);
        assert_eq!(layout.events[0].age, 9);
        assert_eq!(layout.events[1].age, 20);
    }

    #[test]
    fn rerunning_is_deterministic() {
        let events: Vec<Event> = (0..7).map(|i| event(2000 + i, 1, 1, "career")).collect();
        let view = ViewState::default();
        assert_eq!(
            layout_timeline(&events, &view),
            layout_timeline(&events, &view)
        );
    }

    #[test]
    fn literal_view_with_nan_zoom_lays_out_at_default_zoom() {
        let events = vec![event(1990, 3, 15, "birthday"), event(2022, 9, 8, "career")];
        let poisoned = ViewState {
            zoom: f64::NAN,
            selected_categories: None,
        };
        let layout = layout_timeline(&events, &poisoned).unwrap();

        assert_relative_eq!(layout.zoom, 1.0);
        assert_relative_eq!(layout.canvas_width, 3960.0);
        assert!(layout.events.iter().all(|placed| placed.pixel_x.is_finite()));
        assert!(layout.events.iter().all(|placed| placed.card_width > 0.0));
        assert!(layout.year_markers.iter().all(|marker| marker.font_px == 12));
        assert_eq!(layout, layout_timeline(&events, &ViewState::default()).unwrap());
    }

    #[test]
    fn year_markers_cover_both_ends() {
        let span = TimelineSpan {
            start_year: 1990,
            end_year: 2022,
        };
        let markers = year_markers(&span, 1.0);
        assert_eq!(markers.len(), 34);
        assert_eq!(markers[0].year, 1990);
        assert_relative_eq!(markers[0].pixel_x, 200.0);
        assert_eq!(markers[33].year, 2023);
        assert_relative_eq!(markers[33].pixel_x, 3760.0);
        assert_eq!(markers[0].font_px, 12);
    }
}
