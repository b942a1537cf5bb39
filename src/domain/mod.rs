//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, civil-day dates)
//! - `cycle` - Cycle entity, range validation, derived-length recalculation
//! - `daily_note` - Daily journal entries, mood vocabulary, input normalization
//! - `insight` - Derived per-user summary and next-period prediction

pub mod cycle;
pub mod daily_note;
pub mod foundation;
pub mod insight;
