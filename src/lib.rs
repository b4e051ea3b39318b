//! Coach Schedule - Recurring session expansion and lifecycle engine
//!
//! Turns a coach's recurrence pattern into concrete, independently tracked
//! occurrences and cascades pause, resume and delete onto the upcoming ones.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
