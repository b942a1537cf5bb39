//! DeleteCycleHandler - command handler for deleting one cycle.

use std::sync::Arc;

use super::CycleRecalculator;
use crate::application::handlers::insight::RecomputeInsightsHandler;
use crate::domain::cycle::Cycle;
use crate::domain::foundation::{CycleId, DomainError, UserId};
use crate::domain::insight::Insight;
use crate::ports::{CycleRepository, DailyNoteRepository};

/// Command to delete one cycle owned by the user.
#[derive(Debug, Clone)]
pub struct DeleteCycleCommand {
    pub user_id: UserId,
    pub id: CycleId,
}

/// Result of a successful deletion, including the cascade count.
#[derive(Debug)]
pub struct DeleteCycleResult {
    pub cycle: Cycle,
    pub notes_deleted: u64,
    pub insight: Insight,
}

/// Handler for deleting cycles.
///
/// Deleting a cycle cascades deletion of every note referencing it before
/// the recalculation and insight rebuild run.
pub struct DeleteCycleHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    note_repository: Arc<dyn DailyNoteRepository>,
    recalculator: CycleRecalculator,
    recompute_insights: RecomputeInsightsHandler,
}

impl DeleteCycleHandler {
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

    /// Deletes the cycle. Returns `Ok(None)` when the user owns no cycle
    /// with that id.
    pub async fn handle(
        &self,
        cmd: DeleteCycleCommand,
    ) -> Result<Option<DeleteCycleResult>, DomainError> {
        let Some(cycle) = self.cycle_repository.delete(&cmd.user_id, &cmd.id).await? else {
            return Ok(None);
        };

        let notes_deleted = self
            .note_repository
            .delete_by_cycles(&cmd.user_id, &[cycle.id])
            .await?;

        self.recalculator.handle(&cmd.user_id).await?;
        let insight = self.recompute_insights.handle(&cmd.user_id).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            cycle_id = %cmd.id,
            notes_deleted,
            "cycle deleted"
        );
        Ok(Some(DeleteCycleResult {
            cycle,
            notes_deleted,
            insight,
        }))
    }
}
