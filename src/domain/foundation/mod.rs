//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, error types, and the Jakarta civil-day date
//! vocabulary used across the Siklusku domain.

mod civil_day;
mod errors;
mod ids;

pub use civil_day::{civil_to_utc, civil_today, parse_civil_date, utc_to_civil};
pub use errors::{DomainError, ErrorCode};
pub use ids::{CycleId, NoteId, UserId};
