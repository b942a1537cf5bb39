//! In-memory port implementations for route tests.
//!
//! These are faithful implementations over `Mutex`-guarded vectors, not
//! stubs, so route tests exercise the real handler chains end to end.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::cycle::{Cycle, DerivedLengths};
use crate::domain::daily_note::DailyNote;
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, UserId};
use crate::domain::insight::Insight;
use crate::ports::{CycleRepository, DailyNoteRepository, InsightRepository};

#[derive(Default)]
pub struct InMemoryCycleRepository {
    cycles: Mutex<Vec<Cycle>>,
}

impl InMemoryCycleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cycles(cycles: Vec<Cycle>) -> Self {
        Self {
            cycles: Mutex::new(cycles),
        }
    }

    pub fn snapshot(&self) -> Vec<Cycle> {
        self.cycles.lock().unwrap().clone()
    }
}

#[async_trait]
impl CycleRepository for InMemoryCycleRepository {
    async fn insert(&self, cycle: &Cycle) -> Result<(), DomainError> {
        self.cycles.lock().unwrap().push(cycle.clone());
        Ok(())
    }

    async fn update(&self, cycle: &Cycle) -> Result<(), DomainError> {
        let mut cycles = self.cycles.lock().unwrap();
        match cycles
            .iter_mut()
            .find(|c| c.id == cycle.id && c.user_id == cycle.user_id)
        {
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
pub struct InMemoryDailyNoteRepository {
    notes: Mutex<Vec<DailyNote>>,
}

impl InMemoryDailyNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<DailyNote>) -> Self {
        Self {
            notes: Mutex::new(notes),
        }
    }

    pub fn snapshot(&self) -> Vec<DailyNote> {
        self.notes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DailyNoteRepository for InMemoryDailyNoteRepository {
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
            n.user_id != *user_id
                || n.cycle_id.map_or(true, |id| !cycle_ids.contains(&id))
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
pub struct InMemoryInsightRepository {
    insights: Mutex<HashMap<UserId, Insight>>,
}

impl InMemoryInsightRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InsightRepository for InMemoryInsightRepository {
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
