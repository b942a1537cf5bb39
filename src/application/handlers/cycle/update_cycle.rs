//! UpdateCycleHandler - command handler for partial cycle updates.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::CycleRecalculator;
use crate::application::handlers::insight::RecomputeInsightsHandler;
use crate::domain::cycle::{inclusive_span, Cycle};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, UserId};
use crate::domain::insight::Insight;
use crate::ports::CycleRepository;

/// Partial update to a cycle.
///
/// The outer `Option` distinguishes "not mentioned" from an explicit null:
/// `end_date: Some(None)` clears the end date, `end_date: None` leaves it
/// untouched. `predicted_start_date` is the only way this field ever
/// changes; recalculation never writes it.
#[derive(Debug, Clone, Default)]
pub struct CyclePatch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub predicted_start_date: Option<Option<NaiveDate>>,
}

impl CyclePatch {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.predicted_start_date.is_none()
    }
}

/// Command to patch one cycle owned by the user.
#[derive(Debug, Clone)]
pub struct UpdateCycleCommand {
    pub user_id: UserId,
    pub id: CycleId,
    pub patch: CyclePatch,
}

/// Result of a successful update.
#[derive(Debug)]
pub struct UpdateCycleResult {
    pub cycle: Cycle,
    pub insight: Insight,
}

/// Handler for updating cycles.
pub struct UpdateCycleHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    recalculator: CycleRecalculator,
    recompute_insights: RecomputeInsightsHandler,
}

impl UpdateCycleHandler {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        recalculator: CycleRecalculator,
        recompute_insights: RecomputeInsightsHandler,
    ) -> Self {
        Self {
            cycle_repository,
            recalculator,
            recompute_insights,
        }
    }

    /// Applies the patch. Returns `Ok(None)` when the user owns no cycle
    /// with that id.
    pub async fn handle(
        &self,
        cmd: UpdateCycleCommand,
    ) -> Result<Option<UpdateCycleResult>, DomainError> {
        if cmd.patch.is_empty() {
            return Err(DomainError::invalid_input("Patch payload required for cycle update"));
        }

        let Some(mut cycle) = self
            .cycle_repository
            .find_by_id(&cmd.user_id, &cmd.id)
            .await?
        else {
            return Ok(None);
        };

        if let Some(start) = cmd.patch.start_date {
            cycle.start_date = start;
        }
        if let Some(end) = cmd.patch.end_date {
            cycle.end_date = end;
        }
        if let Some(predicted) = cmd.patch.predicted_start_date {
            cycle.predicted_start_date = predicted;
        }

        // Re-validate the patched range, then non-overlap against every
        // other cycle of the same user.
        cycle.period_length = match cycle.end_date {
            Some(end) => Some(inclusive_span(cycle.start_date, end)?),
            None => None,
        };

        if let Some(other) = self
            .cycle_repository
            .find_overlapping(&cmd.user_id, cycle.start_date, cycle.end_date, Some(&cycle.id))
            .await?
        {
            tracing::debug!(user_id = %cmd.user_id, conflicting = %other, "cycle overlap on update");
            return Err(DomainError::new(
                ErrorCode::CycleOverlap,
                "Cycle overlaps with existing cycle",
            ));
        }

        cycle.updated_at = Utc::now();
        self.cycle_repository.update(&cycle).await?;
        self.recalculator.handle(&cmd.user_id).await?;

        let cycle = self
            .cycle_repository
            .find_by_id(&cmd.user_id, &cmd.id)
            .await?
            .unwrap_or(cycle);

        let insight = self.recompute_insights.handle(&cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, cycle_id = %cmd.id, "cycle updated");
        Ok(Some(UpdateCycleResult { cycle, insight }))
    }
}
