//! Lifeline command-line front end.
//!
//! # Responsibility
//! - Manage timelines and events in a local store.
//! - Print computed timeline layouts for inspection or piping.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "lifeline", version, about = "Personal life timeline")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "LIFELINE_DB_PATH", default_value = "lifeline.sqlite3")]
    db: PathBuf,
    /// Directory for rolling log files; logging stays off when unset
    #[arg(long, global = true, env = "LIFELINE_LOG_DIR")]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timeline management
    Timeline {
        #[command(subcommand)]
        action: commands::timeline::TimelineAction,
    },
    /// Event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Voice note management
    Recording {
        #[command(subcommand)]
        action: commands::recording::RecordingAction,
    },
    /// Compute and print a timeline layout
    Layout(commands::view::LayoutArgs),
    /// List merged categories
    Categories,
    /// Suggest photo reassignments for a timeline
    Suggest {
        #[arg(long)]
        timeline: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level: &str = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| lifeline_core::default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    log::info!(
        "event=cli_start module=cli status=ok db={}",
        cli.db.display()
    );

    let result = match lifeline_core::db::open_db(&cli.db) {
        Ok(conn) => match cli.command {
            Commands::Timeline { action } => commands::timeline::run(&conn, action),
            Commands::Event { action } => commands::event::run(&conn, action),
            Commands::Recording { action } => commands::recording::run(&conn, action),
            Commands::Layout(args) => commands::view::layout(&conn, args),
            Commands::Categories => commands::view::categories(&conn),
            Commands::Suggest { timeline } => commands::view::suggest(&conn, &timeline),
        },
        Err(err) => Err(err.into()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(level: &str, log_dir: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let absolute = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    let dir = absolute
        .to_str()
        .ok_or("log directory must be valid UTF-8")?;
    lifeline_core::init_logging(level, dir)?;
    Ok(())
}
