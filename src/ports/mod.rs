//! Ports - contracts between the application layer and infrastructure.
//!
//! Each port is a trait implemented by an adapter. Application handlers
//! depend only on these traits, never on concrete storage.

mod cycle_repository;
mod daily_note_repository;
mod insight_repository;

pub use cycle_repository::CycleRepository;
pub use daily_note_repository::DailyNoteRepository;
pub use insight_repository::InsightRepository;
