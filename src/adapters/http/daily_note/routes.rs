//! Route configuration for daily note endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{
    delete_all_notes, delete_note, list_notes, upsert_note, DailyNoteAppState,
};

/// Creates the daily note router with all endpoints.
///
/// Routes:
/// - `GET /daily-notes` - List the user's notes, newest first
/// - `PUT /daily-notes/:date` - Create or replace the note for a day
/// - `DELETE /daily-notes/:date` - Delete the note for a day
/// - `DELETE /daily-notes?confirm=ALL` - Bulk delete (non-production only)
pub fn daily_note_router() -> Router<DailyNoteAppState> {
    Router::new()
        .route("/daily-notes", get(list_notes).delete(delete_all_notes))
        .route("/daily-notes/:date", put(upsert_note).delete(delete_note))
}
