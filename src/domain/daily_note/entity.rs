//! DailyNote entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::{FlowLevel, Mood};
use crate::domain::foundation::{CycleId, NoteId, UserId};

/// The replaceable content of a note, separate from its identity.
///
/// Upserting an existing `(user, date)` note swaps the content in place and
/// keeps the note's id and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteContent {
    pub cycle_id: Option<CycleId>,
    pub mood: Mood,
    pub symptoms: Option<String>,
    pub flow_level: Option<FlowLevel>,
    pub story: Option<String>,
}

/// One journal entry for a user on a civil day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyNote {
    pub id: NoteId,
    pub user_id: UserId,
    pub cycle_id: Option<CycleId>,
    pub date: NaiveDate,
    pub mood: Mood,
    pub symptoms: Option<String>,
    pub flow_level: Option<FlowLevel>,
    pub story: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DailyNote {
    /// Creates a fresh note for a day with no prior entry.
    pub fn new(user_id: UserId, date: NaiveDate, content: NoteContent, now: DateTime<Utc>) -> Self {
        Self {
            id: NoteId::new(),
            user_id,
            cycle_id: content.cycle_id,
            date,
            mood: content.mood,
            symptoms: content.symptoms,
            flow_level: content.flow_level,
            story: content.story,
            created_at: now,
        }
    }

    /// Replaces the note's content in place, preserving identity and
    /// creation time.
    pub fn replace_content(&mut self, content: NoteContent) {
        self.cycle_id = content.cycle_id;
        self.mood = content.mood;
        self.symptoms = content.symptoms;
        self.flow_level = content.flow_level;
        self.story = content.story;
    }
}
