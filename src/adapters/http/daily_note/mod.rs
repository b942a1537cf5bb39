//! HTTP adapter for the daily note module.
//!
//! - `GET /daily-notes` - List the user's notes
//! - `PUT /daily-notes/:date` - Create or replace the note for a day
//! - `DELETE /daily-notes/:date` - Delete the note for a day
//! - `DELETE /daily-notes?confirm=ALL` - Bulk delete (non-production only)

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::DailyNoteAppState;
pub use routes::daily_note_router;
