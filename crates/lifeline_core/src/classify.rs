//! Photo-to-event reassignment suggestions.
//!
//! # Responsibility
//! - Compare photo names against event titles by token-set Jaccard
//!   similarity.
//! - Suggest moving a photo when another event matches clearly better.
//!
//! # Invariants
//! - Pure and deterministic; ties keep the earliest event in input order.
//! - Event cover images are never reassigned.

use crate::model::event::{Event, EventId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Minimum similarity required before a reassignment is suggested.
pub const MIN_SUGGESTION_SCORE: f64 = 0.2;

static NON_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid non-token regex"));

/// A photo as seen by the classifier: its name and the event it sits under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiablePhoto {
    /// Opaque photo key echoed back in suggestions.
    pub photo_key: String,
    pub name: String,
    pub event_id: EventId,
    /// Cover images belong to their event and are skipped.
    pub is_cover: bool,
}

/// Proposed move of one photo to a better-matching event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub photo_key: String,
    pub from_event_id: EventId,
    pub to_event_id: EventId,
    pub score: f64,
    pub reason: String,
}

/// Lowercased alphanumeric word set of `text`.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    NON_TOKEN_RE
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// `|a ∩ b| / |a ∪ b|`, or 0 when either set is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Suggests reassignments of `photos` among `events`.
pub fn classify_photos(photos: &[ClassifiablePhoto], events: &[Event]) -> Vec<Suggestion> {
    let event_tokens: Vec<(&Event, HashSet<String>)> = events
        .iter()
        .map(|event| (event, tokenize(&event.title)))
        .collect();
    let titles: HashMap<EventId, &str> = events
        .iter()
        .map(|event| (event.uuid, event.title.as_str()))
        .collect();

    let mut suggestions = Vec::new();
    for photo in photos.iter().filter(|photo| !photo.is_cover) {
        let name_tokens = tokenize(&photo.name);
        let mut best_event = photo.event_id;
        let mut best_score = 0.0;
        for (event, tokens) in &event_tokens {
            let score = jaccard(&name_tokens, tokens);
            if score > best_score {
                best_event = event.uuid;
                best_score = score;
            }
        }

        if best_event == photo.event_id || best_score < MIN_SUGGESTION_SCORE {
            continue;
        }

        let to_title = titles.get(&best_event).copied().unwrap_or_default();
        let from_title = titles.get(&photo.event_id).copied().unwrap_or("unknown event");
        suggestions.push(Suggestion {
            photo_key: photo.photo_key.clone(),
            from_event_id: photo.event_id,
            to_event_id: best_event,
            score: best_score,
            reason: format!(
                "Matched name to \"{to_title}\" (similarity {:.0}%). Previously in \"{from_title}\".",
                best_score * 100.0
            ),
        });
    }
    suggestions
}
