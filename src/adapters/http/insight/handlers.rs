//! HTTP handlers for insight and prediction endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;

use crate::application::handlers::insight::{
    GetInsightsHandler, PredictCyclesHandler, PredictCyclesQuery, RecomputeInsightsHandler,
};
use crate::ports::{CycleRepository, DailyNoteRepository, InsightRepository};

use super::super::auth::AuthenticatedUser;
use super::super::error::ApiError;
use super::super::extract::{Json, Query};
use super::super::response::Envelope;
use super::dto::{InsightResponse, PredictionsParams, PredictionsResponse};

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct InsightAppState {
    pub cycle_repository: Arc<dyn CycleRepository>,
    pub note_repository: Arc<dyn DailyNoteRepository>,
    pub insight_repository: Arc<dyn InsightRepository>,
}

impl InsightAppState {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        note_repository: Arc<dyn DailyNoteRepository>,
        insight_repository: Arc<dyn InsightRepository>,
    ) -> Self {
        Self {
            cycle_repository,
            note_repository,
            insight_repository,
        }
    }

    fn recompute_insights_handler(&self) -> RecomputeInsightsHandler {
        RecomputeInsightsHandler::new(
            self.cycle_repository.clone(),
            self.note_repository.clone(),
            self.insight_repository.clone(),
        )
    }

    pub fn get_insights_handler(&self) -> GetInsightsHandler {
        GetInsightsHandler::new(
            self.insight_repository.clone(),
            self.recompute_insights_handler(),
        )
    }

    pub fn predict_cycles_handler(&self) -> PredictCyclesHandler {
        PredictCyclesHandler::new(self.cycle_repository.clone())
    }
}

/// GET /insights - the cached summary, computed on first read.
pub async fn get_insights(
    State(state): State<InsightAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let insight = state.get_insights_handler().handle(&user.user_id).await?;
    Ok(Json(Envelope::new(
        "Insights retrieved",
        InsightResponse::from(&insight),
    )))
}

/// POST /insights/recompute - force a full rebuild.
pub async fn recompute_insights(
    State(state): State<InsightAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let insight = state
        .recompute_insights_handler()
        .handle(&user.user_id)
        .await?;
    Ok(Json(Envelope::new(
        "Insights recomputed",
        InsightResponse::from(&insight),
    )))
}

/// GET /cycles/predictions - projected upcoming start dates.
pub async fn predict_cycles(
    State(state): State<InsightAppState>,
    user: AuthenticatedUser,
    Query(params): Query<PredictionsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let dates = state
        .predict_cycles_handler()
        .handle(PredictCyclesQuery {
            user_id: user.user_id,
            count: params.count,
        })
        .await?;

    let data = PredictionsResponse {
        predicted_start_dates: dates.iter().map(|d| d.to_string()).collect(),
    };
    Ok(Json(Envelope::new("Predictions computed", data)))
}
