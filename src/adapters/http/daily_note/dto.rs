//! HTTP DTOs for daily note endpoints.
//!
//! The upsert body is deliberately forgiving: symptoms accept a list or a
//! pre-joined string, flow level accepts a number or a numeric string. Both
//! are normalized by the domain input types before anything is stored.

use serde::{Deserialize, Serialize};

use crate::adapters::http::insight::dto::InsightResponse;
use crate::domain::daily_note::{DailyNote, FlowInput, SymptomsInput};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `PUT /daily-notes/:date`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertNoteRequest {
    pub mood: String,
    pub symptoms: Option<SymptomsInput>,
    pub flow_level: Option<FlowInput>,
    pub story: Option<String>,
    pub cycle_id: Option<String>,
}

/// Query parameters for listing notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNotesParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for note details.
#[derive(Debug, Clone, Serialize)]
pub struct NoteResponse {
    pub id: String,
    pub cycle_id: Option<String>,
    pub date: String,
    pub mood: String,
    pub symptoms: Option<String>,
    pub flow_level: Option<i16>,
    pub story: Option<String>,
    pub created_at: String,
}

impl From<&DailyNote> for NoteResponse {
    fn from(note: &DailyNote) -> Self {
        Self {
            id: note.id.to_string(),
            cycle_id: note.cycle_id.map(|id| id.to_string()),
            date: note.date.to_string(),
            mood: note.mood.as_str().to_string(),
            symptoms: note.symptoms.clone(),
            flow_level: note.flow_level.map(|f| f.value()),
            story: note.story.clone(),
            created_at: note.created_at.to_rfc3339(),
        }
    }
}

/// Payload for mutations that also rebuild the summary.
#[derive(Debug, Clone, Serialize)]
pub struct NoteWithInsightResponse {
    pub note: NoteResponse,
    pub insight: InsightResponse,
}

/// Payload for bulk deletion.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteAllNotesResponse {
    pub notes_deleted: u64,
    pub insight: InsightResponse,
}
