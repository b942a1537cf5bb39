//! GetInsightsHandler - cached read with lazy build.

use std::sync::Arc;

use super::RecomputeInsightsHandler;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insight::Insight;
use crate::ports::InsightRepository;

/// Returns the user's cached insight, computing it on first read.
pub struct GetInsightsHandler {
    insight_repository: Arc<dyn InsightRepository>,
    recompute: RecomputeInsightsHandler,
}

impl GetInsightsHandler {
    pub fn new(
        insight_repository: Arc<dyn InsightRepository>,
        recompute: RecomputeInsightsHandler,
    ) -> Self {
        Self {
            insight_repository,
            recompute,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Insight, DomainError> {
        if let Some(insight) = self.insight_repository.find_by_user(user_id).await? {
            return Ok(insight);
        }
        self.recompute.handle(user_id).await
    }
}
