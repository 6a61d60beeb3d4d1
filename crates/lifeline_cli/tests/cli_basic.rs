//! CLI end-to-end tests.
//!
//! Each test drives the built binary against its own temporary database.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Run a CLI command and return `(code, stdout, stderr)`.
fn run_cli(db: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_lifeline"))
        .env_remove("LIFELINE_LOG_DIR")
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .expect("failed to execute lifeline");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn created_id(stdout: &str) -> String {
    stdout
        .trim()
        .rsplit(' ')
        .next()
        .expect("id at end of output")
        .to_string()
}

#[test]
fn timeline_list_creates_default_timeline() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");

    let (code, stdout, _) = run_cli(&db, &["timeline", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let timelines = parsed.as_array().unwrap();
    assert_eq!(timelines.len(), 1);
    assert_eq!(timelines[0]["name"], "My Timeline");
}

#[test]
fn layout_json_reports_canvas_and_placements() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");

    let (code, stdout, _) = run_cli(&db, &["timeline", "create", "Life"]);
    assert_eq!(code, 0);
    let timeline = created_id(&stdout);

    for (title, date) in [
        ("Born", "1990-03-15"),
        ("School", "1995-09-01"),
        ("Today", "2022-06-01"),
    ] {
        let (code, _, stderr) = run_cli(
            &db,
            &["event", "add", "--timeline", &timeline, title, "--date", date],
        );
        assert_eq!(code, 0, "{stderr}");
    }

    let (code, stdout, _) = run_cli(&db, &["layout", "--timeline", &timeline, "--json"]);
    assert_eq!(code, 0);
    let layout: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(layout["canvas_width"].as_f64(), Some(3960.0));
    let events = layout["events"].as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["is_above"], true);
    assert_eq!(events[1]["is_above"], false);
    assert_eq!(events[2]["age"], 32);
}

#[test]
fn layout_of_empty_timeline_prints_notice() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");

    let (_, stdout, _) = run_cli(&db, &["timeline", "create", "Empty"]);
    let timeline = created_id(&stdout);

    let (code, stdout, _) = run_cli(&db, &["layout", "--timeline", &timeline]);
    assert_eq!(code, 0);
    assert!(stdout.contains("has no events"));
}

#[test]
fn invalid_timeline_id_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");

    let (code, _, stderr) = run_cli(&db, &["event", "list", "--timeline", "not-a-uuid"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid timeline id"));
}

#[test]
fn categories_lists_builtins() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");

    let (code, stdout, _) = run_cli(&db, &["categories"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let categories = parsed.as_object().unwrap();
    assert_eq!(categories.len(), 6);
    assert!(categories.contains_key("milestone"));
    assert!(categories.contains_key("family"));
}

#[test]
fn event_update_can_clear_description() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");

    let (_, stdout, _) = run_cli(&db, &["timeline", "create", "Life"]);
    let timeline = created_id(&stdout);
    let (code, stdout, stderr) = run_cli(
        &db,
        &[
            "event",
            "add",
            "--timeline",
            &timeline,
            "Moved",
            "--date",
            "2018-01-01",
            "--description",
            "New city",
        ],
    );
    assert_eq!(code, 0, "{stderr}");
    let event = created_id(&stdout);

    let (code, stdout, stderr) =
        run_cli(&db, &["event", "update", &event, "--clear-description"]);
    assert_eq!(code, 0, "{stderr}");
    let updated: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(updated["description"].is_null());

    let (code, _, _) = run_cli(
        &db,
        &[
            "event",
            "update",
            &event,
            "--description",
            "x",
            "--clear-description",
        ],
    );
    assert_eq!(code, 2, "conflicting flags are rejected by the parser");
}

#[test]
fn timeline_share_is_lowercased_and_idempotent() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cli.sqlite3");

    let (_, stdout, _) = run_cli(&db, &["timeline", "create", "Family"]);
    let timeline = created_id(&stdout);
    for email in ["Grandma@Example.com", "grandma@example.com"] {
        let (code, stdout, stderr) = run_cli(&db, &["timeline", "share", &timeline, email]);
        assert_eq!(code, 0, "{stderr}");
        assert!(stdout.contains("grandma@example.com"));
    }

    let (code, stdout, _) = run_cli(&db, &["timeline", "shares", &timeline]);
    assert_eq!(code, 0);
    let shares: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(shares.as_array().unwrap().len(), 1);
}
