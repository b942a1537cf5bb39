//! PostgreSQL adapters - sqlx implementations of the repository ports.
//!
//! Civil dates cross this boundary once: column values are the UTC
//! instants of Jakarta midnights, converted through
//! `domain::foundation::civil_day` in both directions.

mod cycle_repository;
mod daily_note_repository;
mod insight_repository;

pub use cycle_repository::PostgresCycleRepository;
pub use daily_note_repository::PostgresDailyNoteRepository;
pub use insight_repository::PostgresInsightRepository;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::DomainError;

/// Reads one column, wrapping driver failures into the domain taxonomy.
fn column<T>(row: &PgRow, name: &str) -> Result<T, DomainError>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to read column {}", name), e))
}
