//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod pattern;

pub use pattern::{
    CreatePatternCommand, CreatePatternHandler, CreatePatternResult, DeletePatternCommand,
    DeletePatternHandler, DeletePatternResult, PatternLifecycleController, PausePatternCommand,
    PausePatternHandler, PausePatternResult, ResumePatternCommand, ResumePatternHandler,
    ResumePatternResult,
};
