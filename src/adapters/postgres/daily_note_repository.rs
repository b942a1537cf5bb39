//! PostgreSQL implementation of DailyNoteRepository.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::column;
use crate::domain::daily_note::{DailyNote, FlowLevel, Mood};
use crate::domain::foundation::{
    civil_to_utc, utc_to_civil, CycleId, DomainError, ErrorCode, NoteId, UserId,
};
use crate::ports::DailyNoteRepository;

/// PostgreSQL implementation of DailyNoteRepository.
///
/// The `(user_id, date)` unique constraint in the schema backs the
/// one-note-per-day invariant.
#[derive(Clone)]
pub struct PostgresDailyNoteRepository {
    pool: PgPool,
}

impl PostgresDailyNoteRepository {
    /// Creates a new PostgresDailyNoteRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const NOTE_COLUMNS: &str =
    "id, user_id, cycle_id, date, mood, symptoms, flow_level, story, created_at";

#[async_trait]
impl DailyNoteRepository for PostgresDailyNoteRepository {
    async fn find_by_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyNote>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS} FROM daily_notes WHERE user_id = $1 AND date = $2"
        ))
        .bind(user_id.as_str())
        .bind(civil_to_utc(date))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch daily note", e))?;

        row.map(|r| row_to_note(&r)).transpose()
    }

    async fn insert(&self, note: &DailyNote) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO daily_notes (
                id, user_id, cycle_id, date, mood, symptoms, flow_level, story, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(note.id.as_uuid())
        .bind(note.user_id.as_str())
        .bind(note.cycle_id.map(|id| *id.as_uuid()))
        .bind(civil_to_utc(note.date))
        .bind(note.mood.as_str())
        .bind(note.symptoms.as_deref())
        .bind(note.flow_level.map(|f| f.value()))
        .bind(note.story.as_deref())
        .bind(note.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert daily note", e))?;

        Ok(())
    }

    async fn update(&self, note: &DailyNote) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE daily_notes SET
                cycle_id = $2,
                mood = $3,
                symptoms = $4,
                flow_level = $5,
                story = $6
            WHERE id = $1
            "#,
        )
        .bind(note.id.as_uuid())
        .bind(note.cycle_id.map(|id| *id.as_uuid()))
        .bind(note.mood.as_str())
        .bind(note.symptoms.as_deref())
        .bind(note.flow_level.map(|f| f.value()))
        .bind(note.story.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update daily note", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NoteNotFound,
                format!("Daily note not found: {}", note.id),
            ));
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: u32,
    ) -> Result<Vec<DailyNote>, DomainError> {
        // The upper bound is the exclusive instant of the day after `to`,
        // keeping the civil range inclusive.
        let rows = sqlx::query(&format!(
            r#"
            SELECT {NOTE_COLUMNS} FROM daily_notes
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR date >= $2)
              AND ($3::timestamptz IS NULL OR date < $3)
            ORDER BY date DESC
            LIMIT $4
            "#
        ))
        .bind(user_id.as_str())
        .bind(from.map(civil_to_utc))
        .bind(to.map(|d| civil_to_utc(d + Duration::days(1))))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list daily notes", e))?;

        rows.iter().map(row_to_note).collect()
    }

    async fn list_between(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyNote>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {NOTE_COLUMNS} FROM daily_notes
            WHERE user_id = $1 AND date >= $2 AND date < $3
            ORDER BY date ASC
            "#
        ))
        .bind(user_id.as_str())
        .bind(civil_to_utc(from))
        .bind(civil_to_utc(to + Duration::days(1)))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch notes in window", e))?;

        rows.iter().map(row_to_note).collect()
    }

    async fn delete_by_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyNote>, DomainError> {
        let row = sqlx::query(&format!(
            "DELETE FROM daily_notes WHERE user_id = $1 AND date = $2 RETURNING {NOTE_COLUMNS}"
        ))
        .bind(user_id.as_str())
        .bind(civil_to_utc(date))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to delete daily note", e))?;

        row.map(|r| row_to_note(&r)).transpose()
    }

    async fn delete_by_cycles(
        &self,
        user_id: &UserId,
        cycle_ids: &[CycleId],
    ) -> Result<u64, DomainError> {
        if cycle_ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = cycle_ids.iter().map(|id| *id.as_uuid()).collect();

        let result = sqlx::query(
            "DELETE FROM daily_notes WHERE user_id = $1 AND cycle_id = ANY($2)",
        )
        .bind(user_id.as_str())
        .bind(&ids)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to delete notes for cycles", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM daily_notes WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete daily notes", e))?;

        Ok(result.rows_affected())
    }
}

fn row_to_note(row: &PgRow) -> Result<DailyNote, DomainError> {
    let id: Uuid = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let cycle_id: Option<Uuid> = column(row, "cycle_id")?;
    let date: DateTime<Utc> = column(row, "date")?;
    let mood: String = column(row, "mood")?;
    let flow_level: Option<i16> = column(row, "flow_level")?;

    Ok(DailyNote {
        id: NoteId::from_uuid(id),
        user_id: UserId::new(user_id)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.message))?,
        cycle_id: cycle_id.map(CycleId::from_uuid),
        date: utc_to_civil(date),
        mood: mood
            .parse::<Mood>()
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.message))?,
        symptoms: column(row, "symptoms")?,
        flow_level: flow_level
            .map(|v| FlowLevel::new(v as i64))
            .transpose()
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.message))?,
        story: column(row, "story")?,
        created_at: column(row, "created_at")?,
    })
}
