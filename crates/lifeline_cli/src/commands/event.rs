//! Event commands.

use super::{require_id, CommandResult};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use lifeline_core::{EventPatch, EventService, NewEvent, SqliteEventRepository};
use rusqlite::Connection;

#[derive(Subcommand)]
pub enum EventAction {
    /// List events of a timeline, oldest first
    List {
        #[arg(long)]
        timeline: String,
    },
    /// Add an event
    Add {
        #[arg(long)]
        timeline: String,
        title: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "milestone")]
        category: String,
        /// 1..=10
        #[arg(long)]
        importance: Option<u8>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Update selected fields of an event
    Update(UpdateArgs),
    /// Delete an event
    Delete { id: String },
}

#[derive(Args)]
pub struct UpdateArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    importance: Option<u8>,
    #[arg(long)]
    description: Option<String>,
    /// Remove the description
    #[arg(long, conflicts_with = "description")]
    clear_description: bool,
    #[arg(long)]
    image: Option<String>,
    /// Remove the cover image
    #[arg(long, conflicts_with = "image")]
    clear_image: bool,
}

pub fn run(conn: &Connection, action: EventAction) -> CommandResult {
    let service = EventService::new(SqliteEventRepository::new(conn));

    match action {
        EventAction::List { timeline } => {
            let events = service.list_events(require_id(&timeline, "timeline")?)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        EventAction::Add {
            timeline,
            title,
            date,
            category,
            importance,
            description,
            image,
        } => {
            let request = NewEvent {
                title,
                description,
                date,
                category,
                importance,
                image_url: image,
            };
            let event = service.create_event(require_id(&timeline, "timeline")?, request)?;
            println!("Event created: {}", event.uuid);
        }
        EventAction::Update(args) => {
            let id = require_id(&args.id, "event")?;
            let patch = EventPatch {
                title: args.title,
                description: clearable(args.description, args.clear_description),
                date: args.date,
                category: args.category,
                importance: args.importance,
                image_url: clearable(args.image, args.clear_image),
            };
            let event = service.update_event(id, &patch)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        EventAction::Delete { id } => {
            service.delete_event(require_id(&id, "event")?)?;
            println!("Event deleted: {id}");
        }
    }
    Ok(())
}

/// Maps a value/clear flag pair onto a nullable patch field.
fn clearable(value: Option<String>, clear: bool) -> Option<Option<String>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}
