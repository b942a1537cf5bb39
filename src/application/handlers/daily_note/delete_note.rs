//! DeleteNoteHandler - command handler for deleting one day's note.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::handlers::insight::RecomputeInsightsHandler;
use crate::domain::daily_note::DailyNote;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insight::Insight;
use crate::ports::DailyNoteRepository;

/// Command to delete the user's note for one civil day.
#[derive(Debug, Clone)]
pub struct DeleteNoteCommand {
    pub user_id: UserId,
    pub date: NaiveDate,
}

/// Result of a successful deletion.
#[derive(Debug)]
pub struct DeleteNoteResult {
    pub note: DailyNote,
    pub insight: Insight,
}

/// Handler for deleting daily notes.
pub struct DeleteNoteHandler {
    note_repository: Arc<dyn DailyNoteRepository>,
    recompute_insights: RecomputeInsightsHandler,
}

impl DeleteNoteHandler {
    pub fn new(
        note_repository: Arc<dyn DailyNoteRepository>,
        recompute_insights: RecomputeInsightsHandler,
    ) -> Self {
        Self {
            note_repository,
            recompute_insights,
        }
    }

    /// Deletes the note. Returns `Ok(None)` when no note exists for that
    /// exact date; the insight is only rebuilt when something was removed.
    pub async fn handle(
        &self,
        cmd: DeleteNoteCommand,
    ) -> Result<Option<DeleteNoteResult>, DomainError> {
        let Some(note) = self
            .note_repository
            .delete_by_date(&cmd.user_id, cmd.date)
            .await?
        else {
            return Ok(None);
        };

        let insight = self.recompute_insights.handle(&cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, date = %cmd.date, "daily note deleted");
        Ok(Some(DeleteNoteResult { note, insight }))
    }
}
