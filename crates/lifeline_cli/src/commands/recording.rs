//! Voice note commands.

use super::{require_id, CommandResult};
use clap::Subcommand;
use lifeline_core::{RecordingService, SqliteRecordingRepository};
use rusqlite::Connection;

#[derive(Subcommand)]
pub enum RecordingAction {
    /// Attach a recording URL to an event
    Add {
        #[arg(long)]
        event: String,
        url: String,
        /// Defaults to "Recording N"
        #[arg(long)]
        title: Option<String>,
    },
    /// List recordings of an event
    List {
        #[arg(long)]
        event: String,
    },
    /// Rename a recording
    Rename { id: String, title: String },
    /// Delete a recording
    Delete { id: String },
}

pub fn run(conn: &Connection, action: RecordingAction) -> CommandResult {
    let service = RecordingService::new(SqliteRecordingRepository::new(conn));

    match action {
        RecordingAction::Add { event, url, title } => {
            let recording =
                service.add_recording(require_id(&event, "event")?, title.as_deref(), &url)?;
            println!("Recording created: {}", recording.uuid);
        }
        RecordingAction::List { event } => {
            let recordings = service.recordings_for_event(require_id(&event, "event")?)?;
            println!("{}", serde_json::to_string_pretty(&recordings)?);
        }
        RecordingAction::Rename { id, title } => {
            service.rename_recording(require_id(&id, "recording")?, &title)?;
            println!("Recording renamed: {id}");
        }
        RecordingAction::Delete { id } => {
            service.delete_recording(require_id(&id, "recording")?)?;
            println!("Recording deleted: {id}");
        }
    }
    Ok(())
}
