//! Daily note command and query handlers.

mod delete_all_notes;
mod delete_note;
mod list_notes;
mod upsert_note;

pub use delete_all_notes::{DeleteAllNotesHandler, DeleteAllNotesResult};
pub use delete_note::{DeleteNoteCommand, DeleteNoteHandler, DeleteNoteResult};
pub use list_notes::{ListNotesHandler, ListNotesQuery};
pub use upsert_note::{UpsertNoteCommand, UpsertNoteHandler, UpsertNoteResult};
