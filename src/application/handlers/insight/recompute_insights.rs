//! RecomputeInsightsHandler - unconditional insight rebuild.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insight::{build_insight, mood_window, Insight};
use crate::ports::{CycleRepository, DailyNoteRepository, InsightRepository};

/// Rebuilds a user's insight from current cycle and note state.
///
/// The rebuild is deterministic and replaces the stored insight wholesale.
/// Every mutating handler holds one of these and invokes it as its final
/// step; it is also exposed directly for the force-rebuild endpoint.
#[derive(Clone)]
pub struct RecomputeInsightsHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    note_repository: Arc<dyn DailyNoteRepository>,
    insight_repository: Arc<dyn InsightRepository>,
}

impl RecomputeInsightsHandler {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        note_repository: Arc<dyn DailyNoteRepository>,
        insight_repository: Arc<dyn InsightRepository>,
    ) -> Self {
        Self {
            cycle_repository,
            note_repository,
            insight_repository,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Insight, DomainError> {
        let cycles = self.cycle_repository.find_all_for_user(user_id).await?;

        let now = Utc::now();
        let (from, to) = mood_window(now);
        let window_notes = self.note_repository.list_between(user_id, from, to).await?;

        let insight = build_insight(user_id.clone(), &cycles, &window_notes, now);
        self.insight_repository.upsert(&insight).await?;

        tracing::debug!(
            user_id = %user_id,
            total_cycles = insight.total_cycles,
            "insight rebuilt"
        );
        Ok(insight)
    }
}
