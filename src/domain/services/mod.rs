//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod conflict_resolver;
mod planner;
mod registry;
mod stale_detector;

pub use conflict_resolver::{ConflictError, ConflictResolver, Resolution, Winner};
pub use planner::{
    assemble_append, ContentDriftError, Desired, FileAction, Operation, OperationPlan,
    OverwriteRefusedError, Payload, Planner, SkipReason, TargetFileState, WriteRule,
};
pub use registry::{DuplicatePackageError, PathViolation, RegistrationError, ScaffoldRegistry};
pub use stale_detector::{StaleDecision, StaleDetectionResult, StaleDetector, StaleFile};
