//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.
//! Cross-cutting pieces live at this level: the authenticated-user
//! extractor, the shared error-to-response mapping, and the success
//! envelope every endpoint wraps its payload in.

pub mod auth;
pub mod cycle;
pub mod daily_note;
pub mod error;
pub mod extract;
pub mod insight;
pub mod response;

#[cfg(test)]
pub mod testing;

// Re-export key types for convenience
pub use auth::AuthenticatedUser;
pub use cycle::{cycle_router, CycleAppState};
pub use daily_note::{daily_note_router, DailyNoteAppState};
pub use error::{ApiError, ErrorResponse};
pub use extract::{Json, Query};
pub use insight::{insight_router, InsightAppState};
pub use response::Envelope;
