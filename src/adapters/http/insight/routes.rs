//! Route configuration for insight endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{get_insights, predict_cycles, recompute_insights, InsightAppState};

/// Creates the insight router with all endpoints.
///
/// Routes:
/// - `GET /insights` - Read the derived summary (computed on first read)
/// - `POST /insights/recompute` - Force a full rebuild
/// - `GET /cycles/predictions` - Projected upcoming start dates
pub fn insight_router() -> Router<InsightAppState> {
    Router::new()
        .route("/insights", get(get_insights))
        .route("/insights/recompute", post(recompute_insights))
        .route("/cycles/predictions", get(predict_cycles))
}
