//! Subcommand implementations.

pub mod event;
pub mod recording;
pub mod timeline;
pub mod view;

use lifeline_core::service::event_service::parse_id;
use uuid::Uuid;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub(crate) fn require_id(raw: &str, what: &str) -> Result<Uuid, String> {
    parse_id(raw).ok_or_else(|| format!("invalid {what} id: `{raw}`"))
}
