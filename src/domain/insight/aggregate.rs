//! Aggregation math for the insight rebuild.
//!
//! Every function here is deterministic over its inputs; the rebuild is a
//! full recomputation from current state and serves as the correctness
//! oracle for any future incremental scheme.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::{CycleHistoryEntry, Insight, CYCLE_HISTORY_LIMIT};
use crate::domain::cycle::Cycle;
use crate::domain::daily_note::{DailyNote, Mood};
use crate::domain::foundation::{civil_today, UserId};

/// Width of the trailing mood window, in civil days.
pub const MOOD_WINDOW_DAYS: i64 = 30;

/// Mean of the positive day deltas between consecutive cycle starts,
/// rounded to the nearest day. None when no positive delta exists.
///
/// Expects cycles sorted ascending by start date.
pub fn average_cycle_length(cycles_asc: &[Cycle]) -> Option<i32> {
    let mut total: i64 = 0;
    let mut count: i64 = 0;
    for pair in cycles_asc.windows(2) {
        let days = (pair[1].start_date - pair[0].start_date).num_days();
        if days > 0 {
            total += days;
            count += 1;
        }
    }
    rounded_mean(total, count)
}

/// Mean inclusive span over cycles that have both a start and an end,
/// rounded to the nearest day. None when no cycle qualifies.
pub fn average_period_length(cycles: &[Cycle]) -> Option<i32> {
    let mut total: i64 = 0;
    let mut count: i64 = 0;
    for cycle in cycles {
        if let Some(end) = cycle.end_date {
            let span = (end - cycle.start_date).num_days() + 1;
            if span > 0 {
                total += span;
                count += 1;
            }
        }
    }
    rounded_mean(total, count)
}

fn rounded_mean(total: i64, count: i64) -> Option<i32> {
    (count > 0).then(|| (total as f64 / count as f64).round() as i32)
}

/// Inclusive civil-day bounds of the trailing 30-day window ending "today".
pub fn mood_window(now: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
    let today = civil_today(now);
    (today - chrono::Duration::days(MOOD_WINDOW_DAYS - 1), today)
}

/// Counts each mood among the given notes, omitting zero counts.
///
/// Callers supply notes already restricted to the window.
pub fn mood_distribution(window_notes: &[DailyNote]) -> BTreeMap<Mood, u32> {
    let mut distribution = BTreeMap::new();
    for note in window_notes {
        *distribution.entry(note.mood).or_insert(0u32) += 1;
    }
    distribution
}

/// Builds the full insight snapshot from current state.
///
/// `cycles` may arrive in any order; `window_notes` are the user's notes
/// within [`mood_window`].
pub fn build_insight(
    user_id: UserId,
    cycles: &[Cycle],
    window_notes: &[DailyNote],
    now: DateTime<Utc>,
) -> Insight {
    let mut ordered: Vec<&Cycle> = cycles.iter().collect();
    ordered.sort_by_key(|c| c.start_date);
    let asc: Vec<Cycle> = ordered.iter().map(|c| (*c).clone()).collect();

    let cycle_history: Vec<CycleHistoryEntry> = ordered
        .iter()
        .rev()
        .take(CYCLE_HISTORY_LIMIT)
        .map(|c| CycleHistoryEntry::from(*c))
        .collect();

    Insight {
        user_id,
        average_cycle_length: average_cycle_length(&asc),
        average_period_length: average_period_length(&asc),
        mood_distribution_last_30d: mood_distribution(window_notes),
        cycle_history,
        last_computed_at: now,
        total_cycles: cycles.len() as u32,
    }
}
