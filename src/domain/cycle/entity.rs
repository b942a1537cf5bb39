//! Cycle entity and date-range arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::foundation::{CycleId, DomainError, ErrorCode, UserId};

/// One tracked cycle for a user.
///
/// `period_length` and `cycle_length` are derived fields: the first is the
/// inclusive day span of `start_date..end_date`, the second the day delta to
/// the previous cycle's start. Both are recomputed by
/// [`recalculate_lengths`](super::recalculate_lengths) after every cycle-set
/// change. `predicted_start_date` is a manual value and is never overwritten
/// by recalculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cycle {
    pub id: CycleId,
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub period_length: Option<i32>,
    pub cycle_length: Option<i32>,
    pub predicted_start_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cycle {
    /// Creates a new cycle with a validated date range.
    ///
    /// `period_length` is computed from the range when an end date is given;
    /// `cycle_length` starts empty and is filled by the recalculation pass.
    pub fn new(
        user_id: UserId,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let period_length = end_date.map(|end| inclusive_span(start_date, end)).transpose()?;
        Ok(Self {
            id: CycleId::new(),
            user_id,
            start_date,
            end_date,
            period_length,
            cycle_length: None,
            predicted_start_date: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the last civil day of this cycle's range.
    ///
    /// Open-ended cycles occupy only their start day for containment and
    /// overlap purposes.
    pub fn effective_end(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Returns true when the given civil day falls inside this cycle.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.effective_end()
    }

    /// Returns true when this cycle's range overlaps `[start, end-or-start]`.
    pub fn overlaps(&self, start: NaiveDate, end: Option<NaiveDate>) -> bool {
        let other_end = end.unwrap_or(start);
        self.start_date <= other_end && start <= self.effective_end()
    }
}

/// Inclusive day span of a `start..=end` range.
///
/// Fails with `InvalidDateRange` when the end precedes the start; a
/// single-day cycle has span 1.
pub fn inclusive_span(start: NaiveDate, end: NaiveDate) -> Result<i32, DomainError> {
    if end < start {
        return Err(DomainError::new(
            ErrorCode::InvalidDateRange,
            "Start date must be before or equal to end date",
        ));
    }
    Ok((end - start).num_days() as i32 + 1)
}
