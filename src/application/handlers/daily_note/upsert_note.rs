//! UpsertNoteHandler - create-or-replace of a day's journal entry.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::application::handlers::insight::RecomputeInsightsHandler;
use crate::domain::daily_note::{
    normalize_story, DailyNote, FlowInput, NoteContent, SymptomsInput,
};
use crate::domain::foundation::{CycleId, DomainError, UserId};
use crate::domain::insight::Insight;
use crate::ports::{CycleRepository, DailyNoteRepository};

/// Command to upsert the note for one civil day.
///
/// `mood` arrives raw and is matched case-insensitively against the fixed
/// vocabulary; symptoms and flow level arrive in their loose client shapes
/// and are normalized here.
#[derive(Debug, Clone)]
pub struct UpsertNoteCommand {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub mood: String,
    pub symptoms: Option<SymptomsInput>,
    pub flow_level: Option<FlowInput>,
    pub story: Option<String>,
    pub cycle_id: Option<CycleId>,
}

/// Result of an upsert: the stored note plus the refreshed summary.
#[derive(Debug)]
pub struct UpsertNoteResult {
    pub note: DailyNote,
    pub insight: Insight,
}

/// Handler for upserting daily notes.
pub struct UpsertNoteHandler {
    note_repository: Arc<dyn DailyNoteRepository>,
    cycle_repository: Arc<dyn CycleRepository>,
    recompute_insights: RecomputeInsightsHandler,
}

impl UpsertNoteHandler {
    pub fn new(
        note_repository: Arc<dyn DailyNoteRepository>,
        cycle_repository: Arc<dyn CycleRepository>,
        recompute_insights: RecomputeInsightsHandler,
    ) -> Self {
        Self {
            note_repository,
            cycle_repository,
            recompute_insights,
        }
    }

    pub async fn handle(&self, cmd: UpsertNoteCommand) -> Result<UpsertNoteResult, DomainError> {
        let mood = cmd.mood.parse()?;
        let flow_level = match cmd.flow_level {
            Some(input) => input.parse()?,
            None => None,
        };
        let symptoms = cmd.symptoms.and_then(SymptomsInput::normalize);
        let story = normalize_story(cmd.story);

        let cycle_id = match cmd.cycle_id {
            Some(id) => Some(id),
            None => self.resolve_cycle(&cmd.user_id, cmd.date).await?,
        };

        let content = NoteContent {
            cycle_id,
            mood,
            symptoms,
            flow_level,
            story,
        };

        // Replace in place when a note exists for this day, keeping its
        // identity and creation time; otherwise create a fresh one.
        let note = match self
            .note_repository
            .find_by_date(&cmd.user_id, cmd.date)
            .await?
        {
            Some(mut existing) => {
                existing.replace_content(content);
                self.note_repository.update(&existing).await?;
                existing
            }
            None => {
                let note = DailyNote::new(cmd.user_id.clone(), cmd.date, content, Utc::now());
                self.note_repository.insert(&note).await?;
                note
            }
        };

        let insight = self.recompute_insights.handle(&cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, date = %cmd.date, "daily note upserted");
        Ok(UpsertNoteResult { note, insight })
    }

    /// Resolves the cycle whose range contains the note's date.
    ///
    /// First match wins; a miss is not an error, the note simply stays
    /// unlinked.
    async fn resolve_cycle(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<CycleId>, DomainError> {
        let cycles = self.cycle_repository.find_all_for_user(user_id).await?;
        Ok(cycles.iter().find(|c| c.contains(date)).map(|c| c.id))
    }
}
