//! PatternLifecycleController - facade over the pattern command handlers.
//!
//! Wires the four handlers against one store, publisher and clock so callers
//! deal with a single entry point.

use std::sync::Arc;

use super::{
    CreatePatternCommand, CreatePatternHandler, CreatePatternResult, DeletePatternCommand,
    DeletePatternHandler, DeletePatternResult, PausePatternCommand, PausePatternHandler,
    PausePatternResult, ResumePatternCommand, ResumePatternHandler, ResumePatternResult,
};
use crate::config::SchedulingConfig;
use crate::domain::foundation::{CommandMetadata, PatternId};
use crate::domain::recurrence::{OccurrenceGenerator, PatternDraft, RecurrenceError};
use crate::ports::{Clock, EventPublisher, ScheduleStore};

pub struct PatternLifecycleController {
    create: CreatePatternHandler,
    pause: PausePatternHandler,
    resume: ResumePatternHandler,
    delete: DeletePatternHandler,
}

impl PatternLifecycleController {
    pub fn new(
        store: Arc<dyn ScheduleStore>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        scheduling: &SchedulingConfig,
    ) -> Self {
        Self {
            create: CreatePatternHandler::new(
                store.clone(),
                event_publisher.clone(),
                clock.clone(),
                scheduling.default_horizon_months,
            ),
            pause: PausePatternHandler::new(store.clone(), event_publisher.clone(), clock.clone()),
            resume: ResumePatternHandler::new(
                store.clone(),
                event_publisher.clone(),
                clock.clone(),
            ),
            delete: DeletePatternHandler::new(store, event_publisher, clock),
        }
    }

    /// Replace the generator used for creation.
    pub fn with_generator(mut self, generator: OccurrenceGenerator) -> Self {
        self.create = self.create.with_generator(generator);
        self
    }

    pub async fn create_pattern(
        &self,
        draft: PatternDraft,
        metadata: CommandMetadata,
    ) -> Result<CreatePatternResult, RecurrenceError> {
        self.create
            .handle(CreatePatternCommand { draft }, metadata)
            .await
    }

    pub async fn pause_pattern(
        &self,
        pattern_id: PatternId,
        metadata: CommandMetadata,
    ) -> Result<PausePatternResult, RecurrenceError> {
        self.pause
            .handle(PausePatternCommand { pattern_id }, metadata)
            .await
    }

    pub async fn resume_pattern(
        &self,
        pattern_id: PatternId,
        metadata: CommandMetadata,
    ) -> Result<ResumePatternResult, RecurrenceError> {
        self.resume
            .handle(ResumePatternCommand { pattern_id }, metadata)
            .await
    }

    pub async fn delete_pattern(
        &self,
        pattern_id: PatternId,
        metadata: CommandMetadata,
    ) -> Result<DeletePatternResult, RecurrenceError> {
        self.delete
            .handle(DeletePatternCommand { pattern_id }, metadata)
            .await
    }
}
