use approx::assert_relative_eq;
use chrono::NaiveDate;
use lifeline_core::db::open_db_in_memory;
use lifeline_core::{
    Anchor, EventService, NewEvent, RepoError, SqliteEventRepository, SqliteTimelineRepository,
    TimelineService, ViewState,
};
use std::collections::BTreeSet;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn end_to_end_three_event_scenario() {
    let conn = open_db_in_memory().unwrap();
    let timelines = TimelineService::new(
        SqliteTimelineRepository::new(&conn),
        SqliteEventRepository::new(&conn),
    );
    let events = EventService::new(SqliteEventRepository::new(&conn));

    let timeline = timelines.create_timeline("Me").unwrap();
    // Inserted out of order on purpose.
    for (title, day, category) in [
        ("Started work", date(2022, 9, 8), "career"),
        ("Born", date(1990, 3, 15), "birthday"),
        ("School", date(1995, 9, 5), "education"),
    ] {
        events
            .create_event(timeline.uuid, NewEvent::new(title, day, category))
            .unwrap();
    }

    let view = timelines
        .timeline_view(timeline.uuid, &ViewState::default())
        .unwrap();
    assert_eq!(view.timeline.event_count, 3);
    let layout = view.layout.expect("non-empty timeline has a layout");

    assert_eq!(layout.span.start_year, 1990);
    assert_eq!(layout.span.end_year, 2022);
    assert_eq!(layout.total_years, 33);
    assert_relative_eq!(layout.canvas_width, 3960.0);

    let first = &layout.events[0];
    // March contributes two twelfths of a year.
    let expected_first = 200.0 + ((2.0 / 12.0) / 33.0) * 3560.0;
    assert_relative_eq!(first.pixel_x, expected_first, epsilon = 1e-9);
    assert_eq!(first.anchor, Anchor::Left);
    assert!(first.is_above);
    assert_eq!(first.age, 0);

    let second = &layout.events[1];
    assert!(!second.is_above);
    assert_eq!(second.age, 5);
    assert_eq!(second.anchor, Anchor::Center);

    let last = &layout.events[2];
    let expected = 200.0 + ((2022.0 - 1990.0 + 8.0 / 12.0) / 33.0) * 3560.0;
    assert_relative_eq!(last.pixel_x, expected, epsilon = 1e-9);
    assert!((last.pixel_x - 3724.0).abs() < 1.0);
    assert_eq!(last.anchor, Anchor::Right);
    assert!(last.is_above);
    assert_eq!(last.age, 32);

    assert_eq!(layout.year_markers.len(), 34);
}

#[test]
fn empty_timeline_has_no_layout() {
    let conn = open_db_in_memory().unwrap();
    let timelines = TimelineService::new(
        SqliteTimelineRepository::new(&conn),
        SqliteEventRepository::new(&conn),
    );
    let timeline = timelines.create_timeline("Empty").unwrap();

    let view = timelines
        .timeline_view(timeline.uuid, &ViewState::default())
        .unwrap();
    assert!(view.events.is_empty());
    assert!(view.layout.is_none());
    assert!(view.visible_events().is_empty());
}

#[test]
fn category_filter_changes_alternation_but_not_span() {
    let conn = open_db_in_memory().unwrap();
    let timelines = TimelineService::new(
        SqliteTimelineRepository::new(&conn),
        SqliteEventRepository::new(&conn),
    );
    let events = EventService::new(SqliteEventRepository::new(&conn));
    let timeline = timelines.create_timeline("Filtered").unwrap();

    for (title, day, category) in [
        ("a", date(2000, 1, 1), "career"),
        ("b", date(2001, 1, 1), "family"),
        ("c", date(2002, 1, 1), "career"),
        ("d", date(2010, 1, 1), "family"),
    ] {
        events
            .create_event(timeline.uuid, NewEvent::new(title, day, category))
            .unwrap();
    }

    let view_state = ViewState::new(2.0, Some(BTreeSet::from(["career".to_string()])));
    let view = timelines.timeline_view(timeline.uuid, &view_state).unwrap();
    let layout = view.layout.as_ref().unwrap();

    assert_eq!(layout.span.end_year, 2010);
    assert_eq!(layout.events.len(), 2);
    assert!(layout.events[0].is_above);
    assert!(!layout.events[1].is_above);
    assert_relative_eq!(layout.events[0].card_width, 640.0);

    let titles: Vec<&str> = view
        .visible_events()
        .into_iter()
        .map(|event| event.title.as_str())
        .collect();
    assert_eq!(titles, ["a", "c"]);

    let visible = events.list_visible(timeline.uuid, &view_state).unwrap();
    assert_eq!(visible.len(), 2);
}

#[test]
fn timeline_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let timelines = TimelineService::new(
        SqliteTimelineRepository::new(&conn),
        SqliteEventRepository::new(&conn),
    );

    let default = timelines.ensure_default_timeline().unwrap();
    assert_eq!(default.name, "My Timeline");
    assert_eq!(timelines.ensure_default_timeline().unwrap().uuid, default.uuid);

    let renamed = timelines.rename_timeline(default.uuid, " Family ").unwrap();
    assert_eq!(renamed.name, "Family");
    assert!(matches!(
        timelines.rename_timeline(default.uuid, "  ").unwrap_err(),
        RepoError::Validation(_)
    ));

    timelines.delete_timeline(default.uuid).unwrap();
    assert!(timelines.list_timelines().unwrap().is_empty());
    assert!(matches!(
        timelines
            .timeline_view(Uuid::new_v4(), &ViewState::default())
            .unwrap_err(),
        RepoError::NotFound { entity: "timeline", .. }
    ));
}
