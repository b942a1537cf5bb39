//! Integration tests for the persist → recalculate → reaggregate chain.
//!
//! Every mutating handler must leave the stored insight identical to a
//! fresh recomputation from the raw records. These tests drive the real
//! application handlers against in-memory repositories and check that
//! oracle after each kind of mutation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use siklusku::application::handlers::cycle::{
    CreateCycleCommand, CreateCycleHandler, CyclePatch, CycleRecalculator, DeleteAllCyclesHandler,
    DeleteCycleCommand, DeleteCycleHandler, UpdateCycleCommand, UpdateCycleHandler,
};
use siklusku::application::handlers::daily_note::{
    DeleteAllNotesHandler, UpsertNoteCommand, UpsertNoteHandler,
};
use siklusku::application::handlers::insight::RecomputeInsightsHandler;
use siklusku::domain::cycle::{Cycle, DerivedLengths};
use siklusku::domain::daily_note::{DailyNote, Mood};
use siklusku::domain::foundation::{civil_today, CycleId, DomainError, ErrorCode, UserId};
use siklusku::domain::insight::{build_insight, mood_window, Insight};
use siklusku::ports::{CycleRepository, DailyNoteRepository, InsightRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

#[derive(Default)]
struct TestCycleRepository {
    cycles: Mutex<Vec<Cycle>>,
}

#[async_trait]
impl CycleRepository for TestCycleRepository {
    async fn insert(&self, cycle: &Cycle) -> Result<(), DomainError> {
        self.cycles.lock().unwrap().push(cycle.clone());
        Ok(())
    }

    async fn update(&self, cycle: &Cycle) -> Result<(), DomainError> {
        let mut cycles = self.cycles.lock().unwrap();
        match cycles.iter_mut().find(|c| c.id == cycle.id) {
            Some(slot) => {
                *slot = cycle.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::CycleNotFound, "Cycle not found")),
        }
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        id: &CycleId,
    ) -> Result<Option<Cycle>, DomainError> {
        Ok(self
            .cycles
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id && c.user_id == *user_id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
        before: Option<NaiveDate>,
    ) -> Result<Vec<Cycle>, DomainError> {
        let mut cycles: Vec<Cycle> = self
            .cycles
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == *user_id)
            .filter(|c| before.map_or(true, |b| c.start_date < b))
            .cloned()
            .collect();
        cycles.sort_by_key(|c| std::cmp::Reverse(c.start_date));
        cycles.truncate(limit as usize);
        Ok(cycles)
    }

    async fn find_all_for_user(&self, user_id: &UserId) -> Result<Vec<Cycle>, DomainError> {
        let mut cycles: Vec<Cycle> = self
            .cycles
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == *user_id)
            .cloned()
            .collect();
        cycles.sort_by_key(|c| c.start_date);
        Ok(cycles)
    }

    async fn find_overlapping(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: Option<NaiveDate>,
        exclude: Option<&CycleId>,
    ) -> Result<Option<CycleId>, DomainError> {
        Ok(self
            .cycles
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == *user_id)
            .filter(|c| exclude != Some(&c.id))
            .find(|c| c.overlaps(start, end))
            .map(|c| c.id))
    }

    async fn apply_derived_lengths(&self, updates: &[DerivedLengths]) -> Result<(), DomainError> {
        let mut cycles = self.cycles.lock().unwrap();
        for update in updates {
            if let Some(cycle) = cycles.iter_mut().find(|c| c.id == update.id) {
                cycle.period_length = update.period_length;
                cycle.cycle_length = update.cycle_length;
            }
        }
        Ok(())
    }

    async fn delete(
        &self,
        user_id: &UserId,
        id: &CycleId,
    ) -> Result<Option<Cycle>, DomainError> {
        let mut cycles = self.cycles.lock().unwrap();
        let pos = cycles
            .iter()
            .position(|c| c.id == *id && c.user_id == *user_id);
        Ok(pos.map(|i| cycles.remove(i)))
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut cycles = self.cycles.lock().unwrap();
        let before = cycles.len();
        cycles.retain(|c| c.user_id != *user_id);
        Ok((before - cycles.len()) as u64)
    }
}

#[derive(Default)]
struct TestDailyNoteRepository {
    notes: Mutex<Vec<DailyNote>>,
}

#[async_trait]
impl DailyNoteRepository for TestDailyNoteRepository {
    async fn find_by_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyNote>, DomainError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.user_id == *user_id && n.date == date)
            .cloned())
    }

    async fn insert(&self, note: &DailyNote) -> Result<(), DomainError> {
        self.notes.lock().unwrap().push(note.clone());
        Ok(())
    }

    async fn update(&self, note: &DailyNote) -> Result<(), DomainError> {
        let mut notes = self.notes.lock().unwrap();
        match notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => {
                *slot = note.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::NoteNotFound, "Note not found")),
        }
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: u32,
    ) -> Result<Vec<DailyNote>, DomainError> {
        let mut notes: Vec<DailyNote> = self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == *user_id)
            .filter(|n| from.map_or(true, |f| n.date >= f))
            .filter(|n| to.map_or(true, |t| n.date <= t))
            .cloned()
            .collect();
        notes.sort_by_key(|n| std::cmp::Reverse(n.date));
        notes.truncate(limit as usize);
        Ok(notes)
    }

    async fn list_between(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyNote>, DomainError> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == *user_id && n.date >= from && n.date <= to)
            .cloned()
            .collect())
    }

    async fn delete_by_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyNote>, DomainError> {
        let mut notes = self.notes.lock().unwrap();
        let pos = notes
            .iter()
            .position(|n| n.user_id == *user_id && n.date == date);
        Ok(pos.map(|i| notes.remove(i)))
    }

    async fn delete_by_cycles(
        &self,
        user_id: &UserId,
        cycle_ids: &[CycleId],
    ) -> Result<u64, DomainError> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| {
            n.user_id != *user_id || n.cycle_id.map_or(true, |id| !cycle_ids.contains(&id))
        });
        Ok((before - notes.len()) as u64)
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| n.user_id != *user_id);
        Ok((before - notes.len()) as u64)
    }
}

#[derive(Default)]
struct TestInsightRepository {
    insights: Mutex<HashMap<UserId, Insight>>,
}

#[async_trait]
impl InsightRepository for TestInsightRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Insight>, DomainError> {
        Ok(self.insights.lock().unwrap().get(user_id).cloned())
    }

    async fn upsert(&self, insight: &Insight) -> Result<(), DomainError> {
        self.insights
            .lock()
            .unwrap()
            .insert(insight.user_id.clone(), insight.clone());
        Ok(())
    }
}

// =============================================================================
// Fixture
// =============================================================================

struct Fixture {
    cycles: Arc<TestCycleRepository>,
    notes: Arc<TestDailyNoteRepository>,
    insights: Arc<TestInsightRepository>,
    user: UserId,
}

impl Fixture {
    fn new() -> Self {
        Self {
            cycles: Arc::new(TestCycleRepository::default()),
            notes: Arc::new(TestDailyNoteRepository::default()),
            insights: Arc::new(TestInsightRepository::default()),
            user: UserId::new("user-1").unwrap(),
        }
    }

    fn recompute(&self) -> RecomputeInsightsHandler {
        RecomputeInsightsHandler::new(
            self.cycles.clone(),
            self.notes.clone(),
            self.insights.clone(),
        )
    }

    fn recalculator(&self) -> CycleRecalculator {
        CycleRecalculator::new(self.cycles.clone())
    }

    fn create_handler(&self) -> CreateCycleHandler {
        CreateCycleHandler::new(self.cycles.clone(), self.recalculator(), self.recompute())
    }

    fn update_handler(&self) -> UpdateCycleHandler {
        UpdateCycleHandler::new(self.cycles.clone(), self.recalculator(), self.recompute())
    }

    fn delete_handler(&self) -> DeleteCycleHandler {
        DeleteCycleHandler::new(
            self.cycles.clone(),
            self.notes.clone(),
            self.recalculator(),
            self.recompute(),
        )
    }

    fn delete_all_cycles_handler(&self) -> DeleteAllCyclesHandler {
        DeleteAllCyclesHandler::new(
            self.cycles.clone(),
            self.notes.clone(),
            self.recalculator(),
            self.recompute(),
        )
    }

    fn upsert_note_handler(&self) -> UpsertNoteHandler {
        UpsertNoteHandler::new(self.notes.clone(), self.cycles.clone(), self.recompute())
    }

    fn delete_all_notes_handler(&self) -> DeleteAllNotesHandler {
        DeleteAllNotesHandler::new(self.notes.clone(), self.recompute())
    }

    async fn create_cycle(&self, start: NaiveDate, end: Option<NaiveDate>) -> Cycle {
        self.create_handler()
            .handle(CreateCycleCommand {
                user_id: self.user.clone(),
                start_date: start,
                end_date: end,
            })
            .await
            .unwrap()
            .cycle
    }

    async fn stored_insight(&self) -> Insight {
        self.insights
            .find_by_user(&self.user)
            .await
            .unwrap()
            .expect("insight should be stored after a mutation")
    }

    /// Rebuilds the insight straight from the raw records, bypassing the
    /// handlers, and asserts the stored copy matches.
    async fn assert_insight_is_fresh(&self) {
        let stored = self.stored_insight().await;
        let cycles = self.cycles.find_all_for_user(&self.user).await.unwrap();
        let now = Utc::now();
        let (from, to) = mood_window(now);
        let window_notes = self.notes.list_between(&self.user, from, to).await.unwrap();
        let fresh = build_insight(self.user.clone(), &cycles, &window_notes, now);

        assert_eq!(stored.average_cycle_length, fresh.average_cycle_length);
        assert_eq!(stored.average_period_length, fresh.average_period_length);
        assert_eq!(
            stored.mood_distribution_last_30d,
            fresh.mood_distribution_last_30d
        );
        assert_eq!(stored.cycle_history, fresh.cycle_history);
        assert_eq!(stored.total_cycles, fresh.total_cycles);
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn creating_cycles_out_of_order_yields_ordered_lengths() {
    let fx = Fixture::new();

    // Middle cycle arrives last; lengths must follow chronological order,
    // not insertion order.
    fx.create_cycle(date(2024, 1, 1), Some(date(2024, 1, 6))).await;
    fx.create_cycle(date(2024, 2, 26), Some(date(2024, 3, 2))).await;
    fx.create_cycle(date(2024, 1, 29), Some(date(2024, 2, 3))).await;

    let cycles = fx.cycles.find_all_for_user(&fx.user).await.unwrap();
    assert_eq!(cycles.len(), 3);
    assert_eq!(cycles[0].cycle_length, None);
    assert_eq!(cycles[1].cycle_length, Some(28));
    assert_eq!(cycles[2].cycle_length, Some(28));
    assert!(cycles.iter().all(|c| c.period_length == Some(6)));

    let insight = fx.stored_insight().await;
    assert_eq!(insight.average_cycle_length, Some(28));
    assert_eq!(insight.average_period_length, Some(6));
    assert_eq!(insight.total_cycles, 3);
    fx.assert_insight_is_fresh().await;
}

#[tokio::test]
async fn updating_a_start_date_ripples_through_neighbours() {
    let fx = Fixture::new();

    fx.create_cycle(date(2024, 1, 1), Some(date(2024, 1, 6))).await;
    let second = fx.create_cycle(date(2024, 1, 29), Some(date(2024, 2, 3))).await;
    fx.create_cycle(date(2024, 2, 26), Some(date(2024, 3, 2))).await;

    let result = fx
        .update_handler()
        .handle(UpdateCycleCommand {
            user_id: fx.user.clone(),
            id: second.id,
            patch: CyclePatch {
                start_date: Some(date(2024, 1, 26)),
                end_date: Some(Some(date(2024, 1, 31))),
                predicted_start_date: None,
            },
        })
        .await
        .unwrap()
        .expect("cycle exists");

    assert_eq!(result.cycle.cycle_length, Some(25));

    // The third cycle's delta changed too.
    let cycles = fx.cycles.find_all_for_user(&fx.user).await.unwrap();
    assert_eq!(cycles[2].cycle_length, Some(31));
    fx.assert_insight_is_fresh().await;
}

#[tokio::test]
async fn deleting_a_cycle_cascades_its_notes() {
    let fx = Fixture::new();

    let first = fx.create_cycle(date(2024, 1, 1), Some(date(2024, 1, 6))).await;
    fx.create_cycle(date(2024, 1, 29), Some(date(2024, 2, 3))).await;

    // One note inside the first cycle, one free-floating.
    for (day, mood) in [(date(2024, 1, 3), "senang"), (date(2024, 1, 20), "normal")] {
        fx.upsert_note_handler()
            .handle(UpsertNoteCommand {
                user_id: fx.user.clone(),
                date: day,
                mood: mood.to_string(),
                symptoms: None,
                flow_level: None,
                story: None,
                cycle_id: None,
            })
            .await
            .unwrap();
    }

    let result = fx
        .delete_handler()
        .handle(DeleteCycleCommand {
            user_id: fx.user.clone(),
            id: first.id,
        })
        .await
        .unwrap()
        .expect("cycle exists");

    assert_eq!(result.notes_deleted, 1);
    let remaining = fx
        .notes
        .list_for_user(&fx.user, None, None, 10)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].date, date(2024, 1, 20));

    let insight = fx.stored_insight().await;
    assert_eq!(insight.total_cycles, 1);
    assert_eq!(insight.average_cycle_length, None);
    fx.assert_insight_is_fresh().await;
}

#[tokio::test]
async fn upserting_twice_keeps_note_identity_and_created_at() {
    let fx = Fixture::new();
    fx.create_cycle(date(2024, 1, 1), Some(date(2024, 1, 6))).await;

    let first = fx
        .upsert_note_handler()
        .handle(UpsertNoteCommand {
            user_id: fx.user.clone(),
            date: date(2024, 1, 3),
            mood: "sedih".to_string(),
            symptoms: None,
            flow_level: None,
            story: Some("long day".to_string()),
            cycle_id: None,
        })
        .await
        .unwrap()
        .note;

    let second = fx
        .upsert_note_handler()
        .handle(UpsertNoteCommand {
            user_id: fx.user.clone(),
            date: date(2024, 1, 3),
            mood: "senang".to_string(),
            symptoms: None,
            flow_level: None,
            story: None,
            cycle_id: None,
        })
        .await
        .unwrap()
        .note;

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.mood, Mood::Senang);
    assert_eq!(second.story, None);

    let all = fx.notes.list_for_user(&fx.user, None, None, 10).await.unwrap();
    assert_eq!(all.len(), 1);
    fx.assert_insight_is_fresh().await;
}

#[tokio::test]
async fn mood_distribution_counts_only_the_trailing_window() {
    let fx = Fixture::new();
    let today = civil_today(Utc::now());

    // Inside the window: today and 29 days back. Outside: 30 days back.
    for (day, mood) in [
        (today, "senang"),
        (today - chrono::Duration::days(29), "senang"),
        (today - chrono::Duration::days(30), "kesal"),
    ] {
        fx.upsert_note_handler()
            .handle(UpsertNoteCommand {
                user_id: fx.user.clone(),
                date: day,
                mood: mood.to_string(),
                symptoms: None,
                flow_level: None,
                story: None,
                cycle_id: None,
            })
            .await
            .unwrap();
    }

    let insight = fx.stored_insight().await;
    assert_eq!(insight.mood_distribution_last_30d.get(&Mood::Senang), Some(&2));
    assert_eq!(insight.mood_distribution_last_30d.get(&Mood::Kesal), None);
    fx.assert_insight_is_fresh().await;
}

#[tokio::test]
async fn bulk_deletes_empty_everything_and_rebuild_reflects_it() {
    let fx = Fixture::new();

    let cycle = fx.create_cycle(date(2024, 1, 1), Some(date(2024, 1, 6))).await;
    fx.create_cycle(date(2024, 1, 29), None).await;
    fx.upsert_note_handler()
        .handle(UpsertNoteCommand {
            user_id: fx.user.clone(),
            date: date(2024, 1, 3),
            mood: "normal".to_string(),
            symptoms: None,
            flow_level: None,
            story: None,
            cycle_id: Some(cycle.id),
        })
        .await
        .unwrap();

    let result = fx.delete_all_cycles_handler().handle(&fx.user).await.unwrap();
    assert_eq!(result.cycles_deleted, 2);
    assert_eq!(result.notes_deleted, 1);

    let insight = fx.stored_insight().await;
    assert_eq!(insight.total_cycles, 0);
    assert_eq!(insight.average_cycle_length, None);
    assert_eq!(insight.average_period_length, None);
    assert!(insight.cycle_history.is_empty());

    // Note bulk delete on an already-empty store still rebuilds cleanly.
    let result = fx.delete_all_notes_handler().handle(&fx.user).await.unwrap();
    assert_eq!(result.notes_deleted, 0);
    fx.assert_insight_is_fresh().await;
}

#[tokio::test]
async fn overlap_is_rejected_against_either_neighbour() {
    let fx = Fixture::new();

    fx.create_cycle(date(2024, 1, 1), Some(date(2024, 1, 6))).await;

    let err = fx
        .create_handler()
        .handle(CreateCycleCommand {
            user_id: fx.user.clone(),
            start_date: date(2024, 1, 6),
            end_date: Some(date(2024, 1, 10)),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CycleOverlap);

    // Open-ended cycles occupy only their start day.
    fx.create_cycle(date(2024, 2, 1), None).await;
    let err = fx
        .create_handler()
        .handle(CreateCycleCommand {
            user_id: fx.user.clone(),
            start_date: date(2024, 1, 25),
            end_date: Some(date(2024, 2, 1)),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CycleOverlap);

    // Touching but not overlapping is fine.
    fx.create_cycle(date(2024, 1, 7), Some(date(2024, 1, 12))).await;
}
