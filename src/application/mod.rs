//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    CreatePatternCommand, CreatePatternHandler, CreatePatternResult, DeletePatternCommand,
    DeletePatternHandler, DeletePatternResult, PatternLifecycleController, PausePatternCommand,
    PausePatternHandler, PausePatternResult, ResumePatternCommand, ResumePatternHandler,
    ResumePatternResult,
};
