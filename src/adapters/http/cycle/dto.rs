//! HTTP DTOs for cycle endpoints.
//!
//! Dates cross the wire as `YYYY-MM-DD` strings and are parsed at this
//! boundary; the application layer only ever sees civil dates.

use serde::{Deserialize, Deserializer, Serialize};

use crate::adapters::http::insight::dto::InsightResponse;
use crate::domain::cycle::Cycle;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a new cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCycleRequest {
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Request to patch a cycle.
///
/// Fields left out of the JSON body stay untouched; an explicit `null`
/// clears the nullable fields. The double `Option` keeps the two apart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCycleRequest {
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub end_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub predicted_start_date: Option<Option<String>>,
}

fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Query parameters for listing cycles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCyclesParams {
    pub limit: Option<u32>,
    pub before: Option<String>,
}

/// Query parameter gating bulk deletion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkDeleteParams {
    pub confirm: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for cycle details.
#[derive(Debug, Clone, Serialize)]
pub struct CycleResponse {
    pub id: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub period_length: Option<i32>,
    pub cycle_length: Option<i32>,
    pub predicted_start_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Cycle> for CycleResponse {
    fn from(cycle: &Cycle) -> Self {
        Self {
            id: cycle.id.to_string(),
            start_date: cycle.start_date.to_string(),
            end_date: cycle.end_date.map(|d| d.to_string()),
            period_length: cycle.period_length,
            cycle_length: cycle.cycle_length,
            predicted_start_date: cycle.predicted_start_date.map(|d| d.to_string()),
            created_at: cycle.created_at.to_rfc3339(),
            updated_at: cycle.updated_at.to_rfc3339(),
        }
    }
}

/// Payload for mutations that also rebuild the summary.
#[derive(Debug, Clone, Serialize)]
pub struct CycleWithInsightResponse {
    pub cycle: CycleResponse,
    pub insight: InsightResponse,
}

/// Payload for single-cycle deletion.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteCycleResponse {
    pub cycle: CycleResponse,
    pub notes_deleted: u64,
    pub insight: InsightResponse,
}

/// Payload for bulk deletion.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteAllCyclesResponse {
    pub cycles_deleted: u64,
    pub notes_deleted: u64,
    pub insight: InsightResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_absent_from_null() {
        let absent: UpdateCycleRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(absent.end_date.is_none());

        let cleared: UpdateCycleRequest =
            serde_json::from_str(r#"{"end_date": null}"#).unwrap();
        assert_eq!(cleared.end_date, Some(None));

        let set: UpdateCycleRequest =
            serde_json::from_str(r#"{"end_date": "2024-02-01"}"#).unwrap();
        assert_eq!(set.end_date, Some(Some("2024-02-01".to_string())));
    }

    #[test]
    fn create_request_deserializes() {
        let req: CreateCycleRequest =
            serde_json::from_str(r#"{"start_date": "2024-01-01", "end_date": "2024-01-06"}"#)
                .unwrap();
        assert_eq!(req.start_date, "2024-01-01");
        assert_eq!(req.end_date.as_deref(), Some("2024-01-06"));
    }
}
