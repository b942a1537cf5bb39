//! HTTP DTOs for insight and prediction endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::insight::{CycleHistoryEntry, Insight};

/// Query parameters for cycle prediction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionsParams {
    pub count: Option<usize>,
}

/// One cycle in the insight history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct CycleHistoryEntryResponse {
    pub id: String,
    pub start: String,
    pub end: Option<String>,
    pub period_length: Option<i32>,
    pub cycle_length: Option<i32>,
}

impl From<&CycleHistoryEntry> for CycleHistoryEntryResponse {
    fn from(entry: &CycleHistoryEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            start: entry.start.to_string(),
            end: entry.end.map(|d| d.to_string()),
            period_length: entry.period_length,
            cycle_length: entry.cycle_length,
        }
    }
}

/// Response for the derived per-user summary.
#[derive(Debug, Clone, Serialize)]
pub struct InsightResponse {
    pub average_cycle_length: Option<i32>,
    pub average_period_length: Option<i32>,
    pub mood_distribution_last_30d: BTreeMap<String, u32>,
    pub cycle_history: Vec<CycleHistoryEntryResponse>,
    pub last_computed_at: String,
    pub total_cycles: u32,
}

impl From<&Insight> for InsightResponse {
    fn from(insight: &Insight) -> Self {
        Self {
            average_cycle_length: insight.average_cycle_length,
            average_period_length: insight.average_period_length,
            mood_distribution_last_30d: insight
                .mood_distribution_last_30d
                .iter()
                .map(|(mood, count)| (mood.as_str().to_string(), *count))
                .collect(),
            cycle_history: insight
                .cycle_history
                .iter()
                .map(CycleHistoryEntryResponse::from)
                .collect(),
            last_computed_at: insight.last_computed_at.to_rfc3339(),
            total_cycles: insight.total_cycles,
        }
    }
}

/// Response for predicted upcoming cycle starts.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionsResponse {
    pub predicted_start_dates: Vec<String>,
}
