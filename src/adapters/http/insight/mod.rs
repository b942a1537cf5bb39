//! HTTP adapter for the insight module.
//!
//! - `GET /insights` - Read the derived summary
//! - `POST /insights/recompute` - Force a full rebuild
//! - `GET /cycles/predictions` - Projected upcoming start dates

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::InsightAppState;
pub use routes::insight_router;
