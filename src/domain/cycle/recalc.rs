//! Full recalculation of derived cycle lengths.
//!
//! Runs after any cycle-set change for a user. The pass is a complete
//! rebuild from the current cycle set, not an incremental patch, so it is
//! idempotent and safe to re-run after any failure.

use super::{inclusive_span, Cycle};
use crate::domain::foundation::{CycleId, DomainError};

/// Recomputed derived fields for one cycle, keyed for batched write-back.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedLengths {
    pub id: CycleId,
    pub period_length: Option<i32>,
    pub cycle_length: Option<i32>,
}

/// Recomputes every cycle's period length and cycle length.
///
/// Cycles are ordered ascending by start date. For each cycle:
/// - `period_length` is the inclusive span when an end date exists, else None;
/// - `cycle_length` is the day delta to the immediately preceding cycle's
///   start when positive, else None, and always None for the earliest cycle.
pub fn recalculate_lengths(cycles: &[Cycle]) -> Result<Vec<DerivedLengths>, DomainError> {
    let mut ordered: Vec<&Cycle> = cycles.iter().collect();
    // Ties on start date cannot survive validation, but the id tiebreak
    // keeps the ordering total either way.
    ordered.sort_by_key(|c| (c.start_date, *c.id.as_uuid()));

    let mut updates = Vec::with_capacity(ordered.len());
    for (i, cycle) in ordered.iter().enumerate() {
        let period_length = match cycle.end_date {
            Some(end) => Some(inclusive_span(cycle.start_date, end)?),
            None => None,
        };
        let cycle_length = if i == 0 {
            None
        } else {
            let days = (cycle.start_date - ordered[i - 1].start_date).num_days() as i32;
            (days > 0).then_some(days)
        };
        updates.push(DerivedLengths {
            id: cycle.id,
            period_length,
            cycle_length,
        });
    }
    Ok(updates)
}
