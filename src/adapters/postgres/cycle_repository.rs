//! PostgreSQL implementation of CycleRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::column;
use crate::domain::cycle::{Cycle, DerivedLengths};
use crate::domain::foundation::{
    civil_to_utc, utc_to_civil, CycleId, DomainError, ErrorCode, UserId,
};
use crate::ports::CycleRepository;

/// PostgreSQL implementation of CycleRepository.
#[derive(Clone)]
pub struct PostgresCycleRepository {
    pool: PgPool,
}

impl PostgresCycleRepository {
    /// Creates a new PostgresCycleRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CYCLE_COLUMNS: &str = "id, user_id, start_date, end_date, period_length, cycle_length, \
                             predicted_start_date, created_at, updated_at";

#[async_trait]
impl CycleRepository for PostgresCycleRepository {
    async fn insert(&self, cycle: &Cycle) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO cycles (
                id, user_id, start_date, end_date, period_length, cycle_length,
                predicted_start_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(cycle.id.as_uuid())
        .bind(cycle.user_id.as_str())
        .bind(civil_to_utc(cycle.start_date))
        .bind(cycle.end_date.map(civil_to_utc))
        .bind(cycle.period_length)
        .bind(cycle.cycle_length)
        .bind(cycle.predicted_start_date.map(civil_to_utc))
        .bind(cycle.created_at)
        .bind(cycle.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert cycle", e))?;

        Ok(())
    }

    async fn update(&self, cycle: &Cycle) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE cycles SET
                start_date = $3,
                end_date = $4,
                period_length = $5,
                predicted_start_date = $6,
                updated_at = $7
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(cycle.id.as_uuid())
        .bind(cycle.user_id.as_str())
        .bind(civil_to_utc(cycle.start_date))
        .bind(cycle.end_date.map(civil_to_utc))
        .bind(cycle.period_length)
        .bind(cycle.predicted_start_date.map(civil_to_utc))
        .bind(cycle.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update cycle", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CycleNotFound,
                format!("Cycle not found: {}", cycle.id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &CycleId,
    ) -> Result<Option<Cycle>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {CYCLE_COLUMNS} FROM cycles WHERE id = $1 AND user_id = $2"
        ))
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch cycle", e))?;

        row.map(|r| row_to_cycle(&r)).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
        before: Option<NaiveDate>,
    ) -> Result<Vec<Cycle>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CYCLE_COLUMNS} FROM cycles
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR start_date < $2)
            ORDER BY start_date DESC
            LIMIT $3
            "#
        ))
        .bind(user_id.as_str())
        .bind(before.map(civil_to_utc))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list cycles", e))?;

        rows.iter().map(row_to_cycle).collect()
    }

    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Cycle>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {CYCLE_COLUMNS} FROM cycles WHERE user_id = $1 ORDER BY start_date ASC"
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch cycles", e))?;

        rows.iter().map(row_to_cycle).collect()
    }

    async fn find_overlapping(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: Option<NaiveDate>,
        exclude: Option<&CycleId>,
    ) -> Result<Option<CycleId>, DomainError> {
        // Interval intersection on [start, end-or-start]; open-ended rows
        // occupy only their start day.
        let row = sqlx::query(
            r#"
            SELECT id FROM cycles
            WHERE user_id = $1
              AND ($4::uuid IS NULL OR id <> $4)
              AND start_date <= $3
              AND COALESCE(end_date, start_date) >= $2
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .bind(civil_to_utc(start))
        .bind(civil_to_utc(end.unwrap_or(start)))
        .bind(exclude.map(|id| *id.as_uuid()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to check cycle overlap", e))?;

        row.map(|r| column::<Uuid>(&r, "id").map(CycleId::from_uuid))
            .transpose()
    }

    async fn apply_derived_lengths(&self, updates: &[DerivedLengths]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        for update in updates {
            sqlx::query(
                "UPDATE cycles SET period_length = $2, cycle_length = $3 WHERE id = $1",
            )
            .bind(update.id.as_uuid())
            .bind(update.period_length)
            .bind(update.cycle_length)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to write derived lengths", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit derived lengths", e))
    }

    async fn delete(
        &self,
        user_id: &UserId,
        id: &CycleId,
    ) -> Result<Option<Cycle>, DomainError> {
        let row = sqlx::query(&format!(
            "DELETE FROM cycles WHERE id = $1 AND user_id = $2 RETURNING {CYCLE_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to delete cycle", e))?;

        row.map(|r| row_to_cycle(&r)).transpose()
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM cycles WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete cycles", e))?;

        Ok(result.rows_affected())
    }
}

fn row_to_cycle(row: &PgRow) -> Result<Cycle, DomainError> {
    let id: Uuid = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let start_date: DateTime<Utc> = column(row, "start_date")?;
    let end_date: Option<DateTime<Utc>> = column(row, "end_date")?;
    let predicted_start_date: Option<DateTime<Utc>> = column(row, "predicted_start_date")?;

    Ok(Cycle {
        id: CycleId::from_uuid(id),
        user_id: UserId::new(user_id)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.message))?,
        start_date: utc_to_civil(start_date),
        end_date: end_date.map(utc_to_civil),
        period_length: column(row, "period_length")?,
        cycle_length: column(row, "cycle_length")?,
        predicted_start_date: predicted_start_date.map(utc_to_civil),
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}
