//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod cycle;
pub mod daily_note;
pub mod insight;
