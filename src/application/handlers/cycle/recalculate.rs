//! CycleRecalculator - derived-length rebuild after cycle-set changes.

use std::sync::Arc;

use crate::domain::cycle::recalculate_lengths;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::CycleRepository;

/// Recomputes every derived cycle length for a user and writes the result
/// back in one batch.
///
/// Always a full rebuild from persisted state, so re-running after a failed
/// chain is safe.
#[derive(Clone)]
pub struct CycleRecalculator {
    cycle_repository: Arc<dyn CycleRepository>,
}

impl CycleRecalculator {
    pub fn new(cycle_repository: Arc<dyn CycleRepository>) -> Self {
        Self { cycle_repository }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<(), DomainError> {
        let cycles = self.cycle_repository.find_all_for_user(user_id).await?;
        if cycles.is_empty() {
            return Ok(());
        }

        let updates = recalculate_lengths(&cycles)?;
        self.cycle_repository.apply_derived_lengths(&updates).await?;

        tracing::debug!(user_id = %user_id, cycles = updates.len(), "derived lengths recalculated");
        Ok(())
    }
}
