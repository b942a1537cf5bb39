//! CreateCycleHandler - command handler for creating cycles.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use super::CycleRecalculator;
use crate::application::handlers::insight::RecomputeInsightsHandler;
use crate::domain::cycle::Cycle;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::insight::Insight;
use crate::ports::CycleRepository;

/// Command to create a new cycle.
#[derive(Debug, Clone)]
pub struct CreateCycleCommand {
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Result of a successful creation: the stored cycle with derived fields
/// filled in, plus the refreshed summary.
#[derive(Debug)]
pub struct CreateCycleResult {
    pub cycle: Cycle,
    pub insight: Insight,
}

/// Handler for creating cycles.
pub struct CreateCycleHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    recalculator: CycleRecalculator,
    recompute_insights: RecomputeInsightsHandler,
}

impl CreateCycleHandler {
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

    pub async fn handle(&self, cmd: CreateCycleCommand) -> Result<CreateCycleResult, DomainError> {
        // Range validation happens in the constructor; overlap is checked
        // against the user's existing cycles before anything is persisted.
        let cycle = Cycle::new(cmd.user_id.clone(), cmd.start_date, cmd.end_date, Utc::now())?;

        if let Some(other) = self
            .cycle_repository
            .find_overlapping(&cmd.user_id, cmd.start_date, cmd.end_date, None)
            .await?
        {
            tracing::debug!(user_id = %cmd.user_id, conflicting = %other, "cycle overlap on create");
            return Err(DomainError::new(
                ErrorCode::CycleOverlap,
                "Cycle overlaps with existing cycle",
            ));
        }

        self.cycle_repository.insert(&cycle).await?;
        self.recalculator.handle(&cmd.user_id).await?;

        // Reload so the response carries the recalculated lengths.
        let cycle = self
            .cycle_repository
            .find_by_id(&cmd.user_id, &cycle.id)
            .await?
            .unwrap_or(cycle);

        let insight = self.recompute_insights.handle(&cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, cycle_id = %cycle.id, "cycle created");
        Ok(CreateCycleResult { cycle, insight })
    }
}
