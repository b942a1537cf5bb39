//! HTTP handlers for cycle endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers. Each request parses its inputs at the boundary and hands the
//! typed values down.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::cycle::{
    CreateCycleCommand, CreateCycleHandler, CyclePatch, CycleRecalculator, DeleteAllCyclesHandler,
    DeleteCycleCommand, DeleteCycleHandler, ListCyclesQuery, ListCyclesHandler,
    UpdateCycleCommand, UpdateCycleHandler,
};
use crate::application::handlers::insight::RecomputeInsightsHandler;
use crate::config::Environment;
use crate::domain::foundation::{parse_civil_date, CycleId, DomainError, ErrorCode};
use crate::ports::{CycleRepository, DailyNoteRepository, InsightRepository};

use super::super::auth::AuthenticatedUser;
use super::super::error::ApiError;
use super::super::extract::{Json, Query};
use super::super::response::Envelope;
use super::dto::{
    BulkDeleteParams, CreateCycleRequest, CycleResponse, CycleWithInsightResponse,
    DeleteAllCyclesResponse, DeleteCycleResponse, ListCyclesParams, UpdateCycleRequest,
};
use crate::adapters::http::insight::dto::InsightResponse;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct CycleAppState {
    pub cycle_repository: Arc<dyn CycleRepository>,
    pub note_repository: Arc<dyn DailyNoteRepository>,
    pub insight_repository: Arc<dyn InsightRepository>,
    pub environment: Environment,
}

impl CycleAppState {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        note_repository: Arc<dyn DailyNoteRepository>,
        insight_repository: Arc<dyn InsightRepository>,
        environment: Environment,
    ) -> Self {
        Self {
            cycle_repository,
            note_repository,
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

    fn recalculator(&self) -> CycleRecalculator {
        CycleRecalculator::new(self.cycle_repository.clone())
    }

    pub fn create_cycle_handler(&self) -> CreateCycleHandler {
        CreateCycleHandler::new(
            self.cycle_repository.clone(),
            self.recalculator(),
            self.recompute_insights(),
        )
    }

    pub fn list_cycles_handler(&self) -> ListCyclesHandler {
        ListCyclesHandler::new(self.cycle_repository.clone())
    }

    pub fn update_cycle_handler(&self) -> UpdateCycleHandler {
        UpdateCycleHandler::new(
            self.cycle_repository.clone(),
            self.recalculator(),
            self.recompute_insights(),
        )
    }

    pub fn delete_cycle_handler(&self) -> DeleteCycleHandler {
        DeleteCycleHandler::new(
            self.cycle_repository.clone(),
            self.note_repository.clone(),
            self.recalculator(),
            self.recompute_insights(),
        )
    }

    pub fn delete_all_cycles_handler(&self) -> DeleteAllCyclesHandler {
        DeleteAllCyclesHandler::new(
            self.cycle_repository.clone(),
            self.note_repository.clone(),
            self.recalculator(),
            self.recompute_insights(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /cycles - list the user's cycles, newest first.
pub async fn list_cycles(
    State(state): State<CycleAppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListCyclesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let before = params
        .before
        .as_deref()
        .map(|s| parse_civil_date(s, "before"))
        .transpose()?;

    let cycles = state
        .list_cycles_handler()
        .handle(ListCyclesQuery {
            user_id: user.user_id,
            limit: params.limit,
            before,
        })
        .await?;

    let data: Vec<CycleResponse> = cycles.iter().map(CycleResponse::from).collect();
    Ok(Json(Envelope::new("Cycles retrieved", data)))
}

/// POST /cycles - record a new cycle.
pub async fn create_cycle(
    State(state): State<CycleAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateCycleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let start_date = parse_civil_date(&request.start_date, "start_date")?;
    let end_date = request
        .end_date
        .as_deref()
        .map(|s| parse_civil_date(s, "end_date"))
        .transpose()?;

    let result = state
        .create_cycle_handler()
        .handle(CreateCycleCommand {
            user_id: user.user_id,
            start_date,
            end_date,
        })
        .await?;

    let data = CycleWithInsightResponse {
        cycle: CycleResponse::from(&result.cycle),
        insight: InsightResponse::from(&result.insight),
    };
    Ok((StatusCode::CREATED, Json(Envelope::new("Cycle created", data))))
}

/// PATCH /cycles/:id - partially update a cycle.
pub async fn update_cycle(
    State(state): State<CycleAppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateCycleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id: CycleId = id.parse()?;

    let patch = CyclePatch {
        start_date: request
            .start_date
            .as_deref()
            .map(|s| parse_civil_date(s, "start_date"))
            .transpose()?,
        end_date: match request.end_date {
            Some(Some(s)) => Some(Some(parse_civil_date(&s, "end_date")?)),
            Some(None) => Some(None),
            None => None,
        },
        predicted_start_date: match request.predicted_start_date {
            Some(Some(s)) => Some(Some(parse_civil_date(&s, "predicted_start_date")?)),
            Some(None) => Some(None),
            None => None,
        },
    };

    let result = state
        .update_cycle_handler()
        .handle(UpdateCycleCommand {
            user_id: user.user_id,
            id,
            patch,
        })
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::CycleNotFound, "Cycle not found"))?;

    let data = CycleWithInsightResponse {
        cycle: CycleResponse::from(&result.cycle),
        insight: InsightResponse::from(&result.insight),
    };
    Ok(Json(Envelope::new("Cycle updated", data)))
}

/// DELETE /cycles/:id - delete one cycle and its notes.
pub async fn delete_cycle(
    State(state): State<CycleAppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: CycleId = id.parse()?;

    let result = state
        .delete_cycle_handler()
        .handle(DeleteCycleCommand {
            user_id: user.user_id,
            id,
        })
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::CycleNotFound, "Cycle not found"))?;

    let data = DeleteCycleResponse {
        cycle: CycleResponse::from(&result.cycle),
        notes_deleted: result.notes_deleted,
        insight: InsightResponse::from(&result.insight),
    };
    Ok(Json(Envelope::new("Cycle deleted", data)))
}

/// DELETE /cycles?confirm=ALL - wipe the user's cycles and their notes.
///
/// Refused in production outright, and without the confirmation token
/// elsewhere.
pub async fn delete_all_cycles(
    State(state): State<CycleAppState>,
    user: AuthenticatedUser,
    Query(params): Query<BulkDeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    check_bulk_delete(&state.environment, params.confirm.as_deref())?;

    let result = state.delete_all_cycles_handler().handle(&user.user_id).await?;

    let data = DeleteAllCyclesResponse {
        cycles_deleted: result.cycles_deleted,
        notes_deleted: result.notes_deleted,
        insight: InsightResponse::from(&result.insight),
    };
    Ok(Json(Envelope::new("All cycles deleted", data)))
}

/// Gate shared by the two bulk-delete endpoints.
pub(in crate::adapters::http) fn check_bulk_delete(
    environment: &Environment,
    confirm: Option<&str>,
) -> Result<(), ApiError> {
    if environment.is_production() {
        return Err(ApiError(DomainError::new(
            ErrorCode::Forbidden,
            "Bulk deletion is disabled in production",
        )));
    }
    if confirm != Some("ALL") {
        return Err(ApiError(DomainError::invalid_input(
            "Bulk deletion requires confirm=ALL",
        )));
    }
    Ok(())
}
