//! Insight query and rebuild handlers.

mod get_insights;
mod predict_cycles;
mod recompute_insights;

pub use get_insights::GetInsightsHandler;
pub use predict_cycles::{PredictCyclesHandler, PredictCyclesQuery};
pub use recompute_insights::RecomputeInsightsHandler;
