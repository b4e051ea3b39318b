//! Pattern command handlers.
//!
//! One handler per lifecycle operation, plus the controller facade.

mod create_pattern;
mod delete_pattern;
mod lifecycle;
mod pause_pattern;
mod resume_pattern;
mod support;

pub use create_pattern::{CreatePatternCommand, CreatePatternHandler, CreatePatternResult};
pub use delete_pattern::{DeletePatternCommand, DeletePatternHandler, DeletePatternResult};
pub use lifecycle::PatternLifecycleController;
pub use pause_pattern::{PausePatternCommand, PausePatternHandler, PausePatternResult};
pub use resume_pattern::{ResumePatternCommand, ResumePatternHandler, ResumePatternResult};
