use chrono::NaiveDate;
use lifeline_core::db::open_db_in_memory;
use lifeline_core::{
    EventService, NewEvent, RecordingService, RepoError, SqliteEventRepository,
    SqliteRecordingRepository, SqliteTimelineRepository, TimelineService, ValidationError,
};
use rusqlite::Connection;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seed_timeline(conn: &Connection) -> Uuid {
    TimelineService::new(
        SqliteTimelineRepository::new(conn),
        SqliteEventRepository::new(conn),
    )
    .create_timeline("Life")
    .unwrap()
    .uuid
}

#[test]
fn blank_titles_are_numbered_per_event() {
    let conn = open_db_in_memory().unwrap();
    let timeline_id = seed_timeline(&conn);
    let events = EventService::new(SqliteEventRepository::new(&conn));
    let recordings = RecordingService::new(SqliteRecordingRepository::new(&conn));

    let wedding = events
        .create_event(timeline_id, NewEvent::new("Wedding", date(2018, 6, 9), "relationship"))
        .unwrap();

    let first = recordings
        .add_recording(wedding.uuid, None, " https://audio/vows.m4a ")
        .unwrap();
    let second = recordings
        .add_recording(wedding.uuid, Some("   "), "https://audio/toast.m4a")
        .unwrap();
    let named = recordings
        .add_recording(wedding.uuid, Some(" First dance "), "https://audio/dance.m4a")
        .unwrap();

    assert_eq!(first.title, "Recording 1");
    assert_eq!(first.url, "https://audio/vows.m4a");
    assert_eq!(second.title, "Recording 2");
    assert_eq!(named.title, "First dance");

    let stored = recordings.recordings_for_event(wedding.uuid).unwrap();
    assert_eq!(
        stored.iter().map(|r| r.uuid).collect::<Vec<_>>(),
        [first.uuid, second.uuid, named.uuid]
    );
}

#[test]
fn recording_requires_url_and_existing_event() {
    let conn = open_db_in_memory().unwrap();
    let timeline_id = seed_timeline(&conn);
    let events = EventService::new(SqliteEventRepository::new(&conn));
    let recordings = RecordingService::new(SqliteRecordingRepository::new(&conn));
    let event = events
        .create_event(timeline_id, NewEvent::new("Born", date(1990, 3, 15), "birthday"))
        .unwrap();

    assert!(matches!(
        recordings.add_recording(event.uuid, Some("empty"), "  ").unwrap_err(),
        RepoError::Validation(ValidationError::EmptyField("recording url"))
    ));
    assert!(matches!(
        recordings
            .add_recording(Uuid::new_v4(), Some("orphan"), "https://audio/x.m4a")
            .unwrap_err(),
        RepoError::NotFound { entity: "event", .. }
    ));
}

#[test]
fn rename_delete_and_event_cascade() {
    let conn = open_db_in_memory().unwrap();
    let timeline_id = seed_timeline(&conn);
    let events = EventService::new(SqliteEventRepository::new(&conn));
    let recordings = RecordingService::new(SqliteRecordingRepository::new(&conn));

    let early = events
        .create_event(timeline_id, NewEvent::new("School", date(1995, 9, 5), "education"))
        .unwrap();
    let late = events
        .create_event(timeline_id, NewEvent::new("Job", date(2012, 9, 3), "career"))
        .unwrap();
    let kept = recordings
        .add_recording(late.uuid, Some("speech"), "https://audio/speech.m4a")
        .unwrap();
    let doomed = recordings
        .add_recording(early.uuid, Some("song"), "https://audio/song.m4a")
        .unwrap();

    let across = recordings.recordings_for_timeline(timeline_id).unwrap();
    assert_eq!(
        across.iter().map(|r| r.uuid).collect::<Vec<_>>(),
        [doomed.uuid, kept.uuid]
    );

    recordings.rename_recording(kept.uuid, " Farewell speech ").unwrap();
    assert_eq!(
        recordings.recordings_for_event(late.uuid).unwrap()[0].title,
        "Farewell speech"
    );
    assert!(matches!(
        recordings.rename_recording(kept.uuid, "  ").unwrap_err(),
        RepoError::Validation(_)
    ));

    events.delete_event(early.uuid).unwrap();
    assert!(recordings.recordings_for_event(early.uuid).unwrap().is_empty());

    recordings.delete_recording(kept.uuid).unwrap();
    assert!(matches!(
        recordings.delete_recording(kept.uuid).unwrap_err(),
        RepoError::NotFound { entity: "recording", .. }
    ));
}
