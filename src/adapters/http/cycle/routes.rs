//! Route configuration for cycle endpoints.

use axum::routing::{get, patch};
use axum::Router;

use super::handlers::{
    create_cycle, delete_all_cycles, delete_cycle, list_cycles, update_cycle, CycleAppState,
};

/// Creates the cycle router with all endpoints.
///
/// Routes:
/// - `GET /cycles` - List the user's cycles, newest first
/// - `POST /cycles` - Record a new cycle
/// - `PATCH /cycles/:id` - Partially update a cycle
/// - `DELETE /cycles/:id` - Delete a cycle and its notes
/// - `DELETE /cycles?confirm=ALL` - Bulk delete (non-production only)
pub fn cycle_router() -> Router<CycleAppState> {
    Router::new()
        .route("/cycles", get(list_cycles).post(create_cycle).delete(delete_all_cycles))
        .route("/cycles/:id", patch(update_cycle).delete(delete_cycle))
}
