//! Cycle command and query handlers.

// Command handlers
mod create_cycle;
mod delete_all_cycles;
mod delete_cycle;
mod update_cycle;

// Query handlers
mod list_cycles;

// Shared recalculation chain
mod recalculate;

pub use create_cycle::{CreateCycleCommand, CreateCycleHandler, CreateCycleResult};
pub use delete_all_cycles::{DeleteAllCyclesHandler, DeleteAllCyclesResult};
pub use delete_cycle::{DeleteCycleCommand, DeleteCycleHandler, DeleteCycleResult};
pub use list_cycles::{ListCyclesHandler, ListCyclesQuery};
pub use recalculate::CycleRecalculator;
pub use update_cycle::{CyclePatch, UpdateCycleCommand, UpdateCycleHandler, UpdateCycleResult};
