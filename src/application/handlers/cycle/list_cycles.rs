//! ListCyclesHandler - query handler for a user's cycle list.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::CycleRepository;

const DEFAULT_LIMIT: u32 = 50;
const MAX_LIMIT: u32 = 100;

/// Query for a user's cycles, most recent first.
#[derive(Debug, Clone)]
pub struct ListCyclesQuery {
    pub user_id: UserId,
    /// Clamped to [1, 100]; defaults to 50.
    pub limit: Option<u32>,
    /// Only cycles starting strictly before this civil day.
    pub before: Option<NaiveDate>,
}

/// Handler for listing cycles.
pub struct ListCyclesHandler {
    cycle_repository: Arc<dyn CycleRepository>,
}

impl ListCyclesHandler {
    pub fn new(cycle_repository: Arc<dyn CycleRepository>) -> Self {
        Self { cycle_repository }
    }

    pub async fn handle(&self, query: ListCyclesQuery) -> Result<Vec<Cycle>, DomainError> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        self.cycle_repository
            .list_for_user(&query.user_id, limit, query.before)
            .await
    }
}
