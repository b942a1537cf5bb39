//! Cycle module - tracked cycle records and their derived lengths.
//!
//! A Cycle spans a start date and an optional end date. Period length and
//! cycle length are derived from the user's full cycle set and are owned by
//! the recalculation pass, never set by callers directly.

mod entity;
mod recalc;

pub use entity::{inclusive_span, Cycle};
pub use recalc::{recalculate_lengths, DerivedLengths};
