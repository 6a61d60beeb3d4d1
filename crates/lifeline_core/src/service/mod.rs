//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI/FFI layers decoupled from storage details.

pub mod category_service;
pub mod event_service;
pub mod journal_service;
pub mod photo_service;
pub mod recording_service;
pub mod timeline_service;
