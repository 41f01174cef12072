//! Lifecycle hooks
//!
//! The host fires one of a fixed set of lifecycle events; each maps onto a
//! scaffold entry point.

use crate::domain::entities::PackageDescriptor;
use crate::domain::ports::{FileSystem, ManifestRepository, PackageSource};
use crate::domain::value_objects::TriggerPoint;
use crate::error::ScaffoldResult;

use super::scaffold::{RunResult, ScaffoldOptions, ScaffoldUseCase};

/// Run the entry point for `trigger`
pub fn dispatch<MR, FS>(
    use_case: &ScaffoldUseCase<MR, FS>,
    trigger: TriggerPoint,
    packages: &[PackageDescriptor],
    options: &ScaffoldOptions,
) -> ScaffoldResult<RunResult>
where
    MR: ManifestRepository,
    FS: FileSystem,
{
    tracing::debug!(event = trigger.as_str(), "dispatching lifecycle event");
    match trigger {
        TriggerPoint::PostInstall | TriggerPoint::PostUpdate | TriggerPoint::PostCreateProject => {
            use_case.scaffold(packages, options)
        }
        TriggerPoint::PreRequire => use_case.before_require(packages, options),
    }
}

/// Load packages from the host, then dispatch
pub fn on_event<MR, FS>(
    use_case: &ScaffoldUseCase<MR, FS>,
    trigger: TriggerPoint,
    source: &dyn PackageSource,
    options: &ScaffoldOptions,
) -> ScaffoldResult<RunResult>
where
    MR: ManifestRepository,
    FS: FileSystem,
{
    let packages = source.packages()?;
    dispatch(use_case, trigger, &packages, options)
}
