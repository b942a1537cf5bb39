//! DeleteAllNotesHandler - bulk note deletion for one user.
//!
//! Gated at the HTTP boundary (non-production plus explicit confirmation),
//! same as the cycle bulk delete.

use std::sync::Arc;

use crate::application::handlers::insight::RecomputeInsightsHandler;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insight::Insight;
use crate::ports::DailyNoteRepository;

/// Result of a bulk note deletion.
#[derive(Debug)]
pub struct DeleteAllNotesResult {
    pub notes_deleted: u64,
    pub insight: Insight,
}

/// Handler for deleting all of a user's notes.
pub struct DeleteAllNotesHandler {
    note_repository: Arc<dyn DailyNoteRepository>,
    recompute_insights: RecomputeInsightsHandler,
}

impl DeleteAllNotesHandler {
    pub fn new(
        note_repository: Arc<dyn DailyNoteRepository>,
        recompute_insights: RecomputeInsightsHandler,
    ) -> Self {
        Self {
            note_repository,
            recompute_insights,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<DeleteAllNotesResult, DomainError> {
        let notes_deleted = self.note_repository.delete_all_for_user(user_id).await?;
        let insight = self.recompute_insights.handle(user_id).await?;

        tracing::info!(user_id = %user_id, notes_deleted, "all daily notes deleted");
        Ok(DeleteAllNotesResult {
            notes_deleted,
            insight,
        })
    }
}
