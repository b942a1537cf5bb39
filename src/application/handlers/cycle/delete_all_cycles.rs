//! DeleteAllCyclesHandler - bulk cycle deletion for one user.
//!
//! The production and explicit-confirmation gates live at the HTTP
//! boundary; by the time this handler runs the bulk delete is authorized.

use std::sync::Arc;

use super::CycleRecalculator;
use crate::application::handlers::insight::RecomputeInsightsHandler;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insight::Insight;
use crate::ports::{CycleRepository, DailyNoteRepository};

/// Result of a bulk cycle deletion.
#[derive(Debug)]
pub struct DeleteAllCyclesResult {
    pub cycles_deleted: u64,
    pub notes_deleted: u64,
    pub insight: Insight,
}

/// Handler for deleting all of a user's cycles.
///
/// Notes referencing one of the deleted cycles are removed in the same
/// chain; notes without a cycle reference are untouched.
pub struct DeleteAllCyclesHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    note_repository: Arc<dyn DailyNoteRepository>,
    recalculator: CycleRecalculator,
    recompute_insights: RecomputeInsightsHandler,
}

impl DeleteAllCyclesHandler {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        note_repository: Arc<dyn DailyNoteRepository>,
        recalculator: CycleRecalculator,
        recompute_insights: RecomputeInsightsHandler,
    ) -> Self {
        Self {
            cycle_repository,
            note_repository,
            recalculator,
            recompute_insights,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<DeleteAllCyclesResult, DomainError> {
        let cycles = self.cycle_repository.find_all_for_user(user_id).await?;
        let cycle_ids: Vec<_> = cycles.iter().map(|c| c.id).collect();

        let notes_deleted = if cycle_ids.is_empty() {
            0
        } else {
            self.note_repository
                .delete_by_cycles(user_id, &cycle_ids)
                .await?
        };

        let cycles_deleted = self.cycle_repository.delete_all_for_user(user_id).await?;

        self.recalculator.handle(user_id).await?;
        let insight = self.recompute_insights.handle(user_id).await?;

        tracing::info!(user_id = %user_id, cycles_deleted, notes_deleted, "all cycles deleted");
        Ok(DeleteAllCyclesResult {
            cycles_deleted,
            notes_deleted,
            insight,
        })
    }
}
