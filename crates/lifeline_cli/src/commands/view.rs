//! Read-only views: layout, categories, photo suggestions.

use super::{require_id, CommandResult};
use clap::Args;
use lifeline_core::{
    CategoryService, PhotoService, SqliteEventRepository, SqlitePhotoRepository,
    SqliteSettingsRepository, SqliteTimelineRepository, TimelineService, ViewState,
};
use rusqlite::Connection;
use std::collections::BTreeSet;

#[derive(Args)]
pub struct LayoutArgs {
    #[arg(long)]
    timeline: String,
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,
    /// Only place events of these categories (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Print the full layout as JSON
    #[arg(long)]
    json: bool,
}

pub fn layout(conn: &Connection, args: LayoutArgs) -> CommandResult {
    let service = TimelineService::new(
        SqliteTimelineRepository::new(conn),
        SqliteEventRepository::new(conn),
    );
    let selected = if args.categories.is_empty() {
        None
    } else {
        Some(args.categories.into_iter().collect::<BTreeSet<_>>())
    };
    let view_state = ViewState::new(args.zoom, selected);
    let view = service.timeline_view(require_id(&args.timeline, "timeline")?, &view_state)?;

    let Some(layout) = &view.layout else {
        println!("Timeline `{}` has no events.", view.timeline.name);
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(layout)?);
        return Ok(());
    }

    println!(
        "{} | {}-{} ({} years) | zoom {:.2} | canvas {:.0}px",
        view.timeline.name,
        layout.span.start_year,
        layout.span.end_year,
        layout.total_years,
        layout.zoom,
        layout.canvas_width
    );
    for (placed, event) in layout.events.iter().zip(view.visible_events()) {
        println!(
            "{:>3} {:>8.1}px {:<12} {:<7} age {:>3} {} {}",
            placed.index,
            placed.pixel_x,
            format!("{:?}", placed.placement),
            format!("{:?}", placed.anchor),
            placed.age,
            event.date,
            event.title
        );
    }
    Ok(())
}

pub fn categories(conn: &Connection) -> CommandResult {
    let service = CategoryService::new(SqliteSettingsRepository::new(conn));
    let merged = service.categories()?;
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

pub fn suggest(conn: &Connection, timeline: &str) -> CommandResult {
    let service = PhotoService::new(
        SqlitePhotoRepository::new(conn),
        SqliteEventRepository::new(conn),
    );
    let suggestions = service.suggest_reassignments(require_id(timeline, "timeline")?)?;
    println!("{}", serde_json::to_string_pretty(&suggestions)?);
    Ok(())
}
