//! Cycle repository port.
//!
//! Defines the contract for persisting and querying cycle records.
//! Implementations must scope every operation to the owning user.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::cycle::{Cycle, DerivedLengths};
use crate::domain::foundation::{CycleId, DomainError, UserId};

/// Repository port for cycle persistence.
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Persists a new cycle.
    async fn insert(&self, cycle: &Cycle) -> Result<(), DomainError>;

    /// Persists changes to an existing cycle.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if no row matches the cycle's id
    async fn update(&self, cycle: &Cycle) -> Result<(), DomainError>;

    /// Finds a cycle owned by the given user. Returns `None` if absent.
    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &CycleId,
    ) -> Result<Option<Cycle>, DomainError>;

    /// Lists the user's cycles, descending by start date.
    ///
    /// When `before` is set, only cycles starting strictly earlier are
    /// returned. `limit` is applied as given; clamping is the caller's job.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
        before: Option<NaiveDate>,
    ) -> Result<Vec<Cycle>, DomainError>;

    /// Loads all of the user's cycles, ascending by start date.
    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Cycle>, DomainError>;

    /// Finds any cycle of the user whose range overlaps `[start, end-or-start]`,
    /// optionally excluding one cycle (for updates against self).
    async fn find_overlapping(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: Option<NaiveDate>,
        exclude: Option<&CycleId>,
    ) -> Result<Option<CycleId>, DomainError>;

    /// Writes recomputed derived lengths back in one batch, keyed by id.
    async fn apply_derived_lengths(&self, updates: &[DerivedLengths]) -> Result<(), DomainError>;

    /// Deletes one cycle owned by the user, returning it, or `None` if absent.
    async fn delete(
        &self,
        user_id: &UserId,
        id: &CycleId,
    ) -> Result<Option<Cycle>, DomainError>;

    /// Deletes all cycles of the user, returning the count removed.
    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<u64, DomainError>;
}
