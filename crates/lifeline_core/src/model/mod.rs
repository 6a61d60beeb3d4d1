//! Domain model for timeline data.
//!
//! # Responsibility
//! - Define canonical records for timelines, events and their attachments.
//! - Keep validation rules next to the data they guard.
//!
//! # Invariants
//! - Every persisted record is identified by a stable UUID.
//! - Records are validated before every repository write.

pub mod category;
pub mod event;
pub mod journal;
pub mod photo;
pub mod recording;
pub mod settings;
pub mod share;
pub mod timeline;
pub mod validation;
