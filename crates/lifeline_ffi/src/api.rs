//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Flatten core layout types into plain envelopes a renderer can draw.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through `ok=false` envelopes, never thrown.
//! - Enum-like fields cross the boundary as lowercase labels.

use chrono::NaiveDate;
use lifeline_core::db::open_db;
use lifeline_core::service::event_service::parse_id;
use lifeline_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    zoom_in as zoom_in_inner, zoom_out as zoom_out_inner, Anchor, Connector, EventLayout,
    EventPatch, EventService, NewEvent, Placement, SqliteEventRepository,
    SqliteTimelineRepository, TimelineLayout, TimelineService, ViewState,
};
use rusqlite::Connection;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::OnceLock;

const ENTRY_DB_FILE_NAME: &str = "lifeline_entry.sqlite3";
const DATE_FORMAT: &str = "%Y-%m-%d";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Next zoom level, capped at the maximum.
#[flutter_rust_bridge::frb(sync)]
pub fn zoom_in(zoom: f64) -> f64 {
    zoom_in_inner(zoom)
}

/// Previous zoom level, floored at the minimum.
#[flutter_rust_bridge::frb(sync)]
pub fn zoom_out(zoom: f64) -> f64 {
    zoom_out_inner(zoom)
}

/// One positioned event card.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub event_id: String,
    pub title: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub category: String,
    pub image_url: Option<String>,
    pub pixel_x: f64,
    pub is_above: bool,
    /// `above_normal|above_edge|below_normal|below_edge`.
    pub placement: String,
    /// `left|center|right`.
    pub anchor: String,
    /// `down_to_axis|up_to_axis`.
    pub connector: String,
    pub age: i32,
    pub card_width: f64,
    pub card_height: f64,
    pub importance: u8,
}

/// One year tick on the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct YearTick {
    pub year: i32,
    pub pixel_x: f64,
    pub font_px: u32,
}

/// Layout response envelope.
///
/// `has_events=false` with `ok=true` means the timeline is empty and the
/// renderer should show its empty state.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayoutResponse {
    pub ok: bool,
    pub message: String,
    pub has_events: bool,
    pub timeline_name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub total_years: u32,
    pub zoom: f64,
    pub canvas_width: f64,
    pub year_ticks: Vec<YearTick>,
    pub cards: Vec<EventCard>,
}

impl TimelineLayoutResponse {
    fn failure(message: impl Into<String>, zoom: f64) -> Self {
        Self {
            ok: false,
            message: message.into(),
            has_events: false,
            timeline_name: String::new(),
            start_year: 0,
            end_year: 0,
            total_years: 0,
            zoom,
            canvas_width: 0.0,
            year_ticks: Vec::new(),
            cards: Vec::new(),
        }
    }
}

/// Generic action response envelope for event mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected event ID, when one exists.
    pub event_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EventActionResponse {
    fn success(message: impl Into<String>, event_id: String) -> Self {
        Self {
            ok: true,
            event_id: Some(event_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            event_id: None,
            message: message.into(),
        }
    }
}

/// Lays out one timeline for the given zoom and category selection.
///
/// `categories=None` or an empty list shows every category.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn timeline_layout(
    timeline_id: String,
    zoom: f64,
    categories: Option<Vec<String>>,
) -> TimelineLayoutResponse {
    let selected = categories
        .filter(|keys| !keys.is_empty())
        .map(|keys| keys.into_iter().collect::<BTreeSet<_>>());
    let view_state = ViewState::new(zoom, selected);

    let Some(id) = parse_id(&timeline_id) else {
        return TimelineLayoutResponse::failure(
            format!("timeline_layout failed: invalid timeline id `{timeline_id}`"),
            view_state.zoom,
        );
    };

    let result = with_connection(|conn| {
        let service = TimelineService::new(
            SqliteTimelineRepository::new(conn),
            SqliteEventRepository::new(conn),
        );
        service
            .timeline_view(id, &view_state)
            .map_err(|err| err.to_string())
    });

    let view = match result {
        Ok(view) => view,
        Err(err) => {
            return TimelineLayoutResponse::failure(
                format!("timeline_layout failed: {err}"),
                view_state.zoom,
            )
        }
    };

    let Some(layout) = view.layout.as_ref() else {
        return TimelineLayoutResponse {
            ok: true,
            message: "No events.".to_string(),
            timeline_name: view.timeline.name.clone(),
            ..TimelineLayoutResponse::failure(String::new(), view_state.zoom)
        };
    };

    let cards = layout
        .events
        .iter()
        .zip(view.visible_events())
        .map(|(placed, event)| EventCard {
            event_id: event.uuid.to_string(),
            title: event.title.clone(),
            date: event.date.format(DATE_FORMAT).to_string(),
            category: event.category.clone(),
            image_url: event.image_url.clone(),
            ..card_geometry(placed)
        })
        .collect::<Vec<_>>();

    TimelineLayoutResponse {
        ok: true,
        message: format!("Placed {} event(s).", cards.len()),
        has_events: true,
        timeline_name: view.timeline.name.clone(),
        cards,
        ..layout_frame(layout)
    }
}

/// Creates an event on a timeline.
///
/// `date` is `YYYY-MM-DD`; `importance=None` uses the default weight.
#[flutter_rust_bridge::frb(sync)]
pub fn event_create(
    timeline_id: String,
    title: String,
    date: String,
    category: String,
    importance: Option<u8>,
    description: Option<String>,
    image_url: Option<String>,
) -> EventActionResponse {
    let parsed = parse_id(&timeline_id)
        .ok_or_else(|| format!("invalid timeline id `{timeline_id}`"))
        .and_then(|id| parse_date(&date).map(|date| (id, date)));
    let (id, date) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => return EventActionResponse::failure(format!("event_create failed: {err}")),
    };

    let request = NewEvent {
        title,
        description,
        date,
        category,
        importance,
        image_url,
    };
    match with_event_service(|service| service.create_event(id, request)) {
        Ok(event) => EventActionResponse::success("Event created.", event.uuid.to_string()),
        Err(err) => EventActionResponse::failure(format!("event_create failed: {err}")),
    }
}

/// Updates the provided fields of an event.
///
/// `None` leaves a field unchanged. `clear_description=true` and
/// `clear_image=true` remove those fields and take precedence over
/// `description` and `image_url`.
#[flutter_rust_bridge::frb(sync)]
#[allow(clippy::too_many_arguments)]
pub fn event_update(
    event_id: String,
    title: Option<String>,
    date: Option<String>,
    category: Option<String>,
    importance: Option<u8>,
    description: Option<String>,
    clear_description: bool,
    image_url: Option<String>,
    clear_image: bool,
) -> EventActionResponse {
    let Some(id) = parse_id(&event_id) else {
        return EventActionResponse::failure(format!(
            "event_update failed: invalid event id `{event_id}`"
        ));
    };
    let date = match date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(err) => return EventActionResponse::failure(format!("event_update failed: {err}")),
    };

    let patch = EventPatch {
        title,
        description: clearable(description, clear_description),
        date,
        category,
        importance,
        image_url: clearable(image_url, clear_image),
    };
    match with_event_service(|service| service.update_event(id, &patch)) {
        Ok(event) => EventActionResponse::success("Event updated.", event.uuid.to_string()),
        Err(err) => EventActionResponse::failure(format!("event_update failed: {err}")),
    }
}

/// Deletes an event.
#[flutter_rust_bridge::frb(sync)]
pub fn event_delete(event_id: String) -> EventActionResponse {
    let Some(id) = parse_id(&event_id) else {
        return EventActionResponse::failure(format!(
            "event_delete failed: invalid event id `{event_id}`"
        ));
    };
    match with_event_service(|service| service.delete_event(id)) {
        Ok(()) => EventActionResponse::success("Event deleted.", id.to_string()),
        Err(err) => EventActionResponse::failure(format!("event_delete failed: {err}")),
    }
}

/// Timeline lookup envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineResponse {
    pub ok: bool,
    pub timeline_id: Option<String>,
    pub name: String,
    pub message: String,
}

/// Returns the default timeline, creating it on first use.
#[flutter_rust_bridge::frb(sync)]
pub fn timeline_default() -> TimelineResponse {
    let result = with_connection(|conn| {
        TimelineService::new(
            SqliteTimelineRepository::new(conn),
            SqliteEventRepository::new(conn),
        )
        .ensure_default_timeline()
        .map_err(|err| err.to_string())
    });
    match result {
        Ok(timeline) => TimelineResponse {
            ok: true,
            timeline_id: Some(timeline.uuid.to_string()),
            name: timeline.name,
            message: "Timeline ready.".to_string(),
        },
        Err(err) => TimelineResponse {
            ok: false,
            timeline_id: None,
            name: String::new(),
            message: format!("timeline_default failed: {err}"),
        },
    }
}

fn layout_frame(layout: &TimelineLayout) -> TimelineLayoutResponse {
    TimelineLayoutResponse {
        ok: true,
        message: String::new(),
        has_events: !layout.events.is_empty(),
        timeline_name: String::new(),
        start_year: layout.span.start_year,
        end_year: layout.span.end_year,
        total_years: layout.total_years,
        zoom: layout.zoom,
        canvas_width: layout.canvas_width,
        year_ticks: layout
            .year_markers
            .iter()
            .map(|marker| YearTick {
                year: marker.year,
                pixel_x: marker.pixel_x,
                font_px: marker.font_px,
            })
            .collect(),
        cards: Vec::new(),
    }
}

fn card_geometry(placed: &EventLayout) -> EventCard {
    EventCard {
        event_id: placed.event_id.to_string(),
        title: String::new(),
        date: String::new(),
        category: String::new(),
        image_url: None,
        pixel_x: placed.pixel_x,
        is_above: placed.is_above,
        placement: placement_label(placed.placement).to_string(),
        anchor: anchor_label(placed.anchor).to_string(),
        connector: connector_label(placed.connector).to_string(),
        age: placed.age,
        card_width: placed.card_width,
        card_height: placed.card_height,
        importance: placed.importance,
    }
}

fn placement_label(placement: Placement) -> &'static str {
    match placement {
        Placement::AboveNormal => "above_normal",
        Placement::AboveEdge => "above_edge",
        Placement::BelowNormal => "below_normal",
        Placement::BelowEdge => "below_edge",
    }
}

fn anchor_label(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::Left => "left",
        Anchor::Center => "center",
        Anchor::Right => "right",
    }
}

fn connector_label(connector: Connector) -> &'static str {
    match connector {
        Connector::DownToAxis => "down_to_axis",
        Connector::UpToAxis => "up_to_axis",
    }
}

fn clearable(value: Option<String>, clear: bool) -> Option<Option<String>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| format!("invalid date `{raw}`: {err}"))
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("LIFELINE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ENTRY_DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_entry_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        log::warn!("event=ffi_db_open module=ffi status=error");
        format!("entry DB open failed: {err}")
    })?;
    f(&conn)
}

fn with_event_service<T>(
    f: impl FnOnce(&EventService<SqliteEventRepository<'_>>) -> lifeline_core::RepoResult<T>,
) -> Result<T, String> {
    with_connection(|conn| {
        let service = EventService::new(SqliteEventRepository::new(conn));
        f(&service).map_err(|err| err.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, event_create, event_delete, event_update, init_logging, ping,
        timeline_default, timeline_layout, zoom_in, zoom_out,
    };
    use lifeline_core::db::open_db;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn zoom_steps_are_clamped() {
        assert!((zoom_in(4.0) - 5.0).abs() < 1e-9);
        assert!((zoom_out(0.4) - 0.3).abs() < 1e-9);
        assert!((zoom_in(1.0) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn created_event_appears_in_layout() {
        let timeline = timeline_default();
        assert!(timeline.ok, "{}", timeline.message);
        let timeline_id = timeline.timeline_id.expect("default timeline id");

        let created = event_create(
            timeline_id.clone(),
            "Graduated".to_string(),
            "2015-06-20".to_string(),
            "education".to_string(),
            Some(8),
            None,
            Some("https://example.com/cap.jpg".to_string()),
        );
        assert!(created.ok, "{}", created.message);
        let event_id = created.event_id.expect("created event id");

        let response = timeline_layout(timeline_id.clone(), 1.0, None);
        assert!(response.ok, "{}", response.message);
        assert!(response.has_events);
        let card = response
            .cards
            .iter()
            .find(|card| card.event_id == event_id)
            .expect("card for created event");
        assert_eq!(card.category, "education");
        assert_eq!(card.date, "2015-06-20");
        assert!((card.card_height - 320.0).abs() < 1e-9);

        let filtered = timeline_layout(timeline_id, 1.0, Some(vec!["no-such".to_string()]));
        assert!(filtered.ok);
        assert!(filtered.cards.is_empty());

        assert!(event_delete(event_id).ok);
    }

    #[test]
    fn event_update_clears_description_and_image() {
        let timeline_id = timeline_default().timeline_id.expect("default timeline id");
        let created = event_create(
            timeline_id,
            "Moved".to_string(),
            "2018-01-01".to_string(),
            "family".to_string(),
            None,
            Some("New city".to_string()),
            Some("https://example.com/house.jpg".to_string()),
        );
        let event_id = created.event_id.expect("created event id");

        let updated = event_update(
            event_id.clone(),
            Some("Moved house".to_string()),
            None,
            None,
            None,
            Some("ignored while clearing".to_string()),
            true,
            None,
            true,
        );
        assert!(updated.ok, "{}", updated.message);

        let conn = open_db(super::resolve_entry_db_path()).expect("open db");
        let (title, description, image_url): (String, Option<String>, Option<String>) = conn
            .query_row(
                "SELECT title, description, image_url FROM events WHERE uuid = ?1",
                [event_id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .expect("query event row");
        assert_eq!(title, "Moved house");
        assert_eq!(description, None);
        assert_eq!(image_url, None);

        assert!(event_delete(event_id).ok);
    }

    #[test]
    fn invalid_inputs_return_failure_envelopes() {
        assert!(!timeline_layout("nope".to_string(), 1.0, None).ok);
        assert!(!event_delete("nope".to_string()).ok);
        let timeline_id = timeline_default().timeline_id.expect("default timeline id");
        let bad_date = event_create(
            timeline_id,
            "Bad".to_string(),
            "2020-13-40".to_string(),
            "milestone".to_string(),
            None,
            None,
            None,
        );
        assert!(!bad_date.ok);
        assert!(bad_date.message.contains("invalid date"));
    }
}
