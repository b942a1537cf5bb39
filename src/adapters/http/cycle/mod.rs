//! HTTP adapter for the cycle module.
//!
//! Exposes cycle CRUD plus the gated bulk wipe:
//!
//! - `GET /cycles` - List the user's cycles
//! - `POST /cycles` - Record a new cycle
//! - `PATCH /cycles/:id` - Partially update a cycle
//! - `DELETE /cycles/:id` - Delete a cycle and its notes
//! - `DELETE /cycles?confirm=ALL` - Bulk delete (non-production only)

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::CycleAppState;
pub use routes::cycle_router;
