//! Insight module - the derived per-user summary.
//!
//! An Insight is a cache: it is always fully reconstructible from the
//! current cycle and note state, rebuilt wholesale after every mutation and
//! never edited independently.

mod aggregate;
mod predict;
mod snapshot;

pub use aggregate::{
    average_cycle_length, average_period_length, build_insight, mood_distribution, mood_window,
    MOOD_WINDOW_DAYS,
};
pub use predict::predict_next_starts;
pub use snapshot::{CycleHistoryEntry, Insight, CYCLE_HISTORY_LIMIT};
