//! PostgreSQL implementation of InsightRepository.
//!
//! The mood histogram and the cycle history are stored as JSONB; they are
//! snapshot values rewritten wholesale on every rebuild, never updated in
//! place.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::column;
use crate::domain::daily_note::Mood;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::insight::{CycleHistoryEntry, Insight};
use crate::ports::InsightRepository;

/// PostgreSQL implementation of InsightRepository.
#[derive(Clone)]
pub struct PostgresInsightRepository {
    pool: PgPool,
}

impl PostgresInsightRepository {
    /// Creates a new PostgresInsightRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightRepository for PostgresInsightRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Insight>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, average_cycle_length, average_period_length,
                   mood_distribution, cycle_history, last_computed_at, total_cycles
            FROM insights
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch insight", e))?;

        row.map(|r| row_to_insight(&r)).transpose()
    }

    async fn upsert(&self, insight: &Insight) -> Result<(), DomainError> {
        let mood_distribution = serde_json::to_value(&insight.mood_distribution_last_30d)
            .map_err(|e| DomainError::database("Failed to encode mood distribution", e))?;
        let cycle_history = serde_json::to_value(&insight.cycle_history)
            .map_err(|e| DomainError::database("Failed to encode cycle history", e))?;

        sqlx::query(
            r#"
            INSERT INTO insights (
                user_id, average_cycle_length, average_period_length,
                mood_distribution, cycle_history, last_computed_at, total_cycles
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                average_cycle_length = EXCLUDED.average_cycle_length,
                average_period_length = EXCLUDED.average_period_length,
                mood_distribution = EXCLUDED.mood_distribution,
                cycle_history = EXCLUDED.cycle_history,
                last_computed_at = EXCLUDED.last_computed_at,
                total_cycles = EXCLUDED.total_cycles
            "#,
        )
        .bind(insight.user_id.as_str())
        .bind(insight.average_cycle_length)
        .bind(insight.average_period_length)
        .bind(mood_distribution)
        .bind(cycle_history)
        .bind(insight.last_computed_at)
        .bind(insight.total_cycles as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to upsert insight", e))?;

        Ok(())
    }
}

fn row_to_insight(row: &PgRow) -> Result<Insight, DomainError> {
    let user_id: String = column(row, "user_id")?;
    let mood_distribution: serde_json::Value = column(row, "mood_distribution")?;
    let cycle_history: serde_json::Value = column(row, "cycle_history")?;
    let total_cycles: i32 = column(row, "total_cycles")?;

    let mood_distribution_last_30d: BTreeMap<Mood, u32> =
        serde_json::from_value(mood_distribution)
            .map_err(|e| DomainError::database("Failed to decode mood distribution", e))?;
    let cycle_history: Vec<CycleHistoryEntry> = serde_json::from_value(cycle_history)
        .map_err(|e| DomainError::database("Failed to decode cycle history", e))?;

    Ok(Insight {
        user_id: UserId::new(user_id)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.message))?,
        average_cycle_length: column(row, "average_cycle_length")?,
        average_period_length: column(row, "average_period_length")?,
        mood_distribution_last_30d,
        cycle_history,
        last_computed_at: column(row, "last_computed_at")?,
        total_cycles: total_cycles as u32,
    })
}
