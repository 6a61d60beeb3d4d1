//! Journal use-case service.
//!
//! # Responsibility
//! - CRUD for journal entries attached to events.
//! - Cross-event journal listing with search, category filter and sorting.
//!
//! # Invariants
//! - Search is case-insensitive over entry title, content and event title.
//! - Sorting is stable; equal keys keep creation order.

use crate::model::event::{EventId, TimelineId};
use crate::model::journal::{JournalEntry, JournalId};
use crate::repo::event_repo::{EventRepository, RepoResult};
use crate::repo::journal_repo::JournalRepository;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JournalSortKey {
    Title,
    EventDate,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Listing options for `JournalService::list_entries`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalQuery {
    pub search: Option<String>,
    /// `None` keeps every category.
    pub categories: Option<BTreeSet<String>>,
    pub sort_by: JournalSortKey,
    pub direction: SortDirection,
}

/// Journal entry joined with the event it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalListItem {
    pub entry: JournalEntry,
    pub event_title: String,
    pub event_date: NaiveDate,
    pub category: String,
}

pub struct JournalService<J: JournalRepository, E: EventRepository> {
    journals: J,
    events: E,
}

impl<J: JournalRepository, E: EventRepository> JournalService<J, E> {
    pub fn new(journals: J, events: E) -> Self {
        Self { journals, events }
    }

    pub fn create_entry(
        &self,
        event_id: EventId,
        title: &str,
        content: &str,
    ) -> RepoResult<JournalEntry> {
        let entry = JournalEntry::new(event_id, title.trim(), content);
        self.journals.create_journal(&entry)?;
        Ok(entry)
    }

    pub fn update_entry(&self, id: JournalId, title: &str, content: &str) -> RepoResult<()> {
        self.journals.update_journal(id, title.trim(), content)
    }

    pub fn delete_entry(&self, id: JournalId) -> RepoResult<()> {
        self.journals.delete_journal(id)
    }

    pub fn entries_for_event(&self, event_id: EventId) -> RepoResult<Vec<JournalEntry>> {
        self.journals.list_for_event(event_id)
    }

    /// Lists a timeline's journal entries across all of its events.
    pub fn list_entries(
        &self,
        timeline_id: TimelineId,
        query: &JournalQuery,
    ) -> RepoResult<Vec<JournalListItem>> {
        let events: HashMap<EventId, _> = self
            .events
            .list_events(timeline_id)?
            .into_iter()
            .map(|event| (event.uuid, event))
            .collect();
        let needle = query
            .search
            .as_deref()
            .map(|text| text.trim().to_lowercase())
            .filter(|text| !text.is_empty());

        let mut items: Vec<JournalListItem> = self
            .journals
            .list_for_timeline(timeline_id)?
            .into_iter()
            .filter_map(|entry| {
                let event = events.get(&entry.event_id)?;
                Some(JournalListItem {
                    event_title: event.title.clone(),
                    event_date: event.date,
                    category: event.category.clone(),
                    entry,
                })
            })
            .filter(|item| {
                query
                    .categories
                    .as_ref()
                    .map_or(true, |selected| selected.contains(&item.category))
            })
            .filter(|item| needle.as_deref().map_or(true, |needle| matches_search(item, needle)))
            .collect();

        items.sort_by(|a, b| {
            let ordering = compare_items(a, b, query.sort_by);
            match query.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        Ok(items)
    }
}

fn matches_search(item: &JournalListItem, needle: &str) -> bool {
    [
        item.entry.title.as_str(),
        item.entry.content.as_str(),
        item.event_title.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

fn compare_items(a: &JournalListItem, b: &JournalListItem, key: JournalSortKey) -> Ordering {
    match key {
        JournalSortKey::Title => a
            .entry
            .title
            .to_lowercase()
            .cmp(&b.entry.title.to_lowercase())
            .then_with(|| a.entry.title.cmp(&b.entry.title)),
        JournalSortKey::EventDate => a.event_date.cmp(&b.event_date),
        JournalSortKey::CreatedAt => a.entry.created_at_ms.cmp(&b.entry.created_at_ms),
    }
}
