//! HTTP handlers for daily note endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::daily_note::{
    DeleteAllNotesHandler, DeleteNoteCommand, DeleteNoteHandler, ListNotesHandler, ListNotesQuery,
    UpsertNoteCommand, UpsertNoteHandler,
};
use crate::application::handlers::insight::RecomputeInsightsHandler;
use crate::config::Environment;
use crate::domain::foundation::{parse_civil_date, CycleId, ErrorCode};
use crate::ports::{CycleRepository, DailyNoteRepository, InsightRepository};

use super::super::auth::AuthenticatedUser;
use super::super::cycle::handlers::check_bulk_delete;
use super::super::error::ApiError;
use super::super::extract::{Json, Query};
use super::super::response::Envelope;
use super::dto::{
    DeleteAllNotesResponse, ListNotesParams, NoteResponse, NoteWithInsightResponse,
    UpsertNoteRequest,
};
use crate::adapters::http::cycle::dto::BulkDeleteParams;
use crate::adapters::http::insight::dto::InsightResponse;

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct DailyNoteAppState {
    pub note_repository: Arc<dyn DailyNoteRepository>,
    pub cycle_repository: Arc<dyn CycleRepository>,
    pub insight_repository: Arc<dyn InsightRepository>,
    pub environment: Environment,
}

impl DailyNoteAppState {
    pub fn new(
        note_repository: Arc<dyn DailyNoteRepository>,
        cycle_repository: Arc<dyn CycleRepository>,
        insight_repository: Arc<dyn InsightRepository>,
        environment: Environment,
    ) -> Self {
        Self {
            note_repository,
            cycle_repository,
            insight_repository,
            environment,
        }
    }

    fn recompute_insights(&self) -> RecomputeInsightsHandler {
        RecomputeInsightsHandler::new(
            self.cycle_repository.clone(),
            self.note_repository.clone(),
            self.insight_repository.clone(),
        )
    }

    pub fn upsert_note_handler(&self) -> UpsertNoteHandler {
        UpsertNoteHandler::new(
            self.note_repository.clone(),
            self.cycle_repository.clone(),
            self.recompute_insights(),
        )
    }

    pub fn list_notes_handler(&self) -> ListNotesHandler {
        ListNotesHandler::new(self.note_repository.clone())
    }

    pub fn delete_note_handler(&self) -> DeleteNoteHandler {
        DeleteNoteHandler::new(self.note_repository.clone(), self.recompute_insights())
    }

    pub fn delete_all_notes_handler(&self) -> DeleteAllNotesHandler {
        DeleteAllNotesHandler::new(self.note_repository.clone(), self.recompute_insights())
    }
}

/// GET /daily-notes - list the user's notes, newest first.
pub async fn list_notes(
    State(state): State<DailyNoteAppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListNotesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let from = params
        .from
        .as_deref()
        .map(|s| parse_civil_date(s, "from"))
        .transpose()?;
    let to = params
        .to
        .as_deref()
        .map(|s| parse_civil_date(s, "to"))
        .transpose()?;

    let notes = state
        .list_notes_handler()
        .handle(ListNotesQuery {
            user_id: user.user_id,
            from,
            to,
            limit: params.limit,
        })
        .await?;

    let data: Vec<NoteResponse> = notes.iter().map(NoteResponse::from).collect();
    Ok(Json(Envelope::new("Daily notes retrieved", data)))
}

/// PUT /daily-notes/:date - create or replace the note for a civil day.
pub async fn upsert_note(
    State(state): State<DailyNoteAppState>,
    user: AuthenticatedUser,
    Path(date): Path<String>,
    Json(request): Json<UpsertNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_civil_date(&date, "date")?;
    let cycle_id = request
        .cycle_id
        .as_deref()
        .map(str::parse::<CycleId>)
        .transpose()?;

    let result = state
        .upsert_note_handler()
        .handle(UpsertNoteCommand {
            user_id: user.user_id,
            date,
            mood: request.mood,
            symptoms: request.symptoms,
            flow_level: request.flow_level,
            story: request.story,
            cycle_id,
        })
        .await?;

    let data = NoteWithInsightResponse {
        note: NoteResponse::from(&result.note),
        insight: InsightResponse::from(&result.insight),
    };
    Ok(Json(Envelope::new("Daily note saved", data)))
}

/// DELETE /daily-notes/:date - delete the note for a civil day.
pub async fn delete_note(
    State(state): State<DailyNoteAppState>,
    user: AuthenticatedUser,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_civil_date(&date, "date")?;

    let result = state
        .delete_note_handler()
        .handle(DeleteNoteCommand {
            user_id: user.user_id,
            date,
        })
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::NoteNotFound, "Note not found"))?;

    let data = NoteWithInsightResponse {
        note: NoteResponse::from(&result.note),
        insight: InsightResponse::from(&result.insight),
    };
    Ok(Json(Envelope::new("Daily note deleted", data)))
}

/// DELETE /daily-notes?confirm=ALL - wipe the user's notes.
pub async fn delete_all_notes(
    State(state): State<DailyNoteAppState>,
    user: AuthenticatedUser,
    Query(params): Query<BulkDeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    check_bulk_delete(&state.environment, params.confirm.as_deref())?;

    let result = state.delete_all_notes_handler().handle(&user.user_id).await?;

    let data = DeleteAllNotesResponse {
        notes_deleted: result.notes_deleted,
        insight: InsightResponse::from(&result.insight),
    };
    Ok(Json(Envelope::new("All daily notes deleted", data)))
}
