//! Application layer - command and query handlers.
//!
//! Every mutating handler runs the full persist → recalculate → reaggregate
//! chain synchronously before returning, so callers always receive the
//! mutated entity alongside a freshly rebuilt insight.

pub mod handlers;
