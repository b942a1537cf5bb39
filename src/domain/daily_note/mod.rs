//! Daily note module - per-day journal entries.
//!
//! A user keeps at most one note per civil day. Notes carry a mood from a
//! fixed five-value vocabulary, normalized free-form symptoms, an optional
//! menstrual flow level, and a free-text story. The owning cycle is resolved
//! automatically from the note's date and is a non-owning back-reference.

mod entity;
mod input;
mod mood;

pub use entity::{DailyNote, NoteContent};
pub use input::{normalize_story, FlowInput, SymptomsInput};
pub use mood::{FlowLevel, Mood};
