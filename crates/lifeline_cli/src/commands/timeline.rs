//! Timeline commands.

use super::{require_id, CommandResult};
use clap::Subcommand;
use lifeline_core::{SqliteEventRepository, SqliteTimelineRepository, TimelineService};
use rusqlite::Connection;

#[derive(Subcommand)]
pub enum TimelineAction {
    /// List timelines (creates the default one on first use)
    List,
    /// Create a timeline
    Create { name: String },
    /// Rename a timeline
    Rename { id: String, name: String },
    /// Delete a timeline and all of its events
    Delete { id: String },
    /// Share a timeline with an email address
    Share { id: String, email: String },
    /// Stop sharing a timeline with an email address
    Unshare { id: String, email: String },
    /// List addresses a timeline is shared with
    Shares { id: String },
}

pub fn run(conn: &Connection, action: TimelineAction) -> CommandResult {
    let service = TimelineService::new(
        SqliteTimelineRepository::new(conn),
        SqliteEventRepository::new(conn),
    );

    match action {
        TimelineAction::List => {
            service.ensure_default_timeline()?;
            println!("{}", serde_json::to_string_pretty(&service.list_timelines()?)?);
        }
        TimelineAction::Create { name } => {
            let timeline = service.create_timeline(name)?;
            println!("Timeline created: {}", timeline.uuid);
        }
        TimelineAction::Rename { id, name } => {
            let timeline = service.rename_timeline(require_id(&id, "timeline")?, &name)?;
            println!("Timeline renamed: {}", timeline.uuid);
        }
        TimelineAction::Delete { id } => {
            service.delete_timeline(require_id(&id, "timeline")?)?;
            println!("Timeline deleted: {id}");
        }
        TimelineAction::Share { id, email } => {
            let share = service.share_timeline(require_id(&id, "timeline")?, &email)?;
            println!("Timeline shared with: {}", share.email);
        }
        TimelineAction::Unshare { id, email } => {
            if service.unshare_timeline(require_id(&id, "timeline")?, &email)? {
                println!("Timeline unshared: {email}");
            } else {
                println!("Timeline was not shared with: {email}");
            }
        }
        TimelineAction::Shares { id } => {
            let shares = service.shared_with(require_id(&id, "timeline")?)?;
            println!("{}", serde_json::to_string_pretty(&shares)?);
        }
    }
    Ok(())
}
