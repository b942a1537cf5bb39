//! ListNotesHandler - query handler for a user's journal entries.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::daily_note::DailyNote;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::DailyNoteRepository;

const DEFAULT_LIMIT: u32 = 120;
const MAX_LIMIT: u32 = 120;

/// Query for a user's notes, most recent first.
#[derive(Debug, Clone)]
pub struct ListNotesQuery {
    pub user_id: UserId,
    /// Inclusive lower bound on the note date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the note date.
    pub to: Option<NaiveDate>,
    /// Clamped to [1, 120]; defaults to 120.
    pub limit: Option<u32>,
}

/// Handler for listing daily notes.
pub struct ListNotesHandler {
    note_repository: Arc<dyn DailyNoteRepository>,
}

impl ListNotesHandler {
    pub fn new(note_repository: Arc<dyn DailyNoteRepository>) -> Self {
        Self { note_repository }
    }

    pub async fn handle(&self, query: ListNotesQuery) -> Result<Vec<DailyNote>, DomainError> {
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(DomainError::invalid_input(
                    "`from` must be before or equal to `to`",
                ));
            }
        }

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        self.note_repository
            .list_for_user(&query.user_id, query.from, query.to, limit)
            .await
    }
}
