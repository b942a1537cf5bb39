//! Daily note repository port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::daily_note::DailyNote;
use crate::domain::foundation::{CycleId, DomainError, UserId};

/// Repository port for daily note persistence.
///
/// The `(user_id, date)` pair is unique; implementations must uphold at
/// most one note per user per civil day.
#[async_trait]
pub trait DailyNoteRepository: Send + Sync {
    /// Finds the user's note for an exact civil day.
    async fn find_by_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyNote>, DomainError>;

    /// Persists a new note.
    async fn insert(&self, note: &DailyNote) -> Result<(), DomainError>;

    /// Persists replaced content of an existing note.
    ///
    /// # Errors
    ///
    /// - `NoteNotFound` if no row matches the note's id
    async fn update(&self, note: &DailyNote) -> Result<(), DomainError>;

    /// Lists the user's notes, descending by date, optionally bounded to an
    /// inclusive `[from, to]` range. `limit` is applied as given.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: u32,
    ) -> Result<Vec<DailyNote>, DomainError>;

    /// Loads all notes of the user dated within inclusive `[from, to]`.
    ///
    /// Used by the insight rebuild for the trailing mood window.
    async fn list_between(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyNote>, DomainError>;

    /// Deletes the user's note for a civil day, returning it, or `None` if
    /// no note exists for that exact date.
    async fn delete_by_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyNote>, DomainError>;

    /// Deletes all notes of the user referencing one of the given cycles,
    /// returning the count removed. Cascade path for cycle deletion.
    async fn delete_by_cycles(
        &self,
        user_id: &UserId,
        cycle_ids: &[CycleId],
    ) -> Result<u64, DomainError>;

    /// Deletes all notes of the user, returning the count removed.
    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<u64, DomainError>;
}
