//! PredictCyclesHandler - next-period prediction query.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insight::predict_next_starts;
use crate::ports::CycleRepository;

/// Query for upcoming predicted cycle starts.
#[derive(Debug, Clone)]
pub struct PredictCyclesQuery {
    pub user_id: UserId,
    /// Requested number of predictions; clamped to [1, 6], default 3.
    pub count: Option<usize>,
}

/// Extrapolates upcoming cycle start dates from historical spacing.
pub struct PredictCyclesHandler {
    cycle_repository: Arc<dyn CycleRepository>,
}

impl PredictCyclesHandler {
    pub fn new(cycle_repository: Arc<dyn CycleRepository>) -> Self {
        Self { cycle_repository }
    }

    pub async fn handle(&self, query: PredictCyclesQuery) -> Result<Vec<NaiveDate>, DomainError> {
        let cycles = self
            .cycle_repository
            .find_all_for_user(&query.user_id)
            .await?;
        Ok(predict_next_starts(&cycles, query.count.unwrap_or(3)))
    }
}
