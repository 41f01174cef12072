//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::{CancellationToken, ScaffoldUseCase};
use crate::domain::ports::RunEventSink;
use crate::infrastructure::{LocalFs, TomlManifestRepository, TracingEventSink};

/// Type alias for the concrete ScaffoldUseCase with all dependencies
pub type ConcreteScaffoldUseCase = ScaffoldUseCase<TomlManifestRepository, LocalFs>;

/// Create a scaffold use case with all dependencies wired up.
///
/// Run events are logged through `tracing`.
pub fn create_scaffold_use_case(cancel: CancellationToken) -> ConcreteScaffoldUseCase {
    create_scaffold_use_case_with_events(cancel, Arc::new(TracingEventSink))
}

/// Create a scaffold use case that reports run events to `events`
pub fn create_scaffold_use_case_with_events(
    cancel: CancellationToken,
    events: Arc<dyn RunEventSink>,
) -> ConcreteScaffoldUseCase {
    ScaffoldUseCase::new(TomlManifestRepository::new(), LocalFs::new())
        .with_events(events)
        .with_cancellation(cancel)
}
