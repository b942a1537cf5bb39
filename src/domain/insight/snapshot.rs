//! Insight snapshot types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cycle::Cycle;
use crate::domain::daily_note::Mood;
use crate::domain::foundation::{CycleId, UserId};

/// Maximum number of cycles kept in the history list.
pub const CYCLE_HISTORY_LIMIT: usize = 12;

/// One reduced cycle in the insight history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleHistoryEntry {
    pub id: CycleId,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub period_length: Option<i32>,
    pub cycle_length: Option<i32>,
}

impl From<&Cycle> for CycleHistoryEntry {
    fn from(cycle: &Cycle) -> Self {
        Self {
            id: cycle.id,
            start: cycle.start_date,
            end: cycle.end_date,
            period_length: cycle.period_length,
            cycle_length: cycle.cycle_length,
        }
    }
}

/// Derived per-user summary, one singleton per user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub user_id: UserId,
    pub average_cycle_length: Option<i32>,
    pub average_period_length: Option<i32>,
    /// Mood counts over the trailing 30 civil days; zero counts omitted.
    pub mood_distribution_last_30d: BTreeMap<Mood, u32>,
    /// Up to 12 most recent cycles, descending by start date.
    pub cycle_history: Vec<CycleHistoryEntry>,
    pub last_computed_at: DateTime<Utc>,
    pub total_cycles: u32,
}
