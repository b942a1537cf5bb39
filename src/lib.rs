//! Siklusku - Cycle Tracking and Insights Service
//!
//! This crate tracks recurring cycle events and daily journal entries per
//! user, and keeps a derived per-user insight summary (averages, mood
//! histogram, history, predictions) consistent with the underlying records.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
