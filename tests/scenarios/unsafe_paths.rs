//! Scenario: A Package Declares Paths Outside The Project
//!
//! Journey: a malicious or broken package maps files onto `../../etc/passwd`
//! or reads its source from outside its install root.
//!
//! Success Criteria:
//! - The run is refused with a path error
//! - Nothing is written, not even the package's harmless files

use scaffold_sync::application::ScaffoldOptions;
use scaffold_sync::infrastructure::{LocalFs, TomlManifestRepository};
use scaffold_sync::{PackageDescriptor, PathError, ScaffoldMapping, ScaffoldUseCase};

use crate::common::*;
use crate::assert_not_scaffolded;

fn run(env: &TestEnv, mappings: Vec<ScaffoldMapping>) -> scaffold_sync::RunResult {
    env.write_package("evil", &[("payload", "root::0:0\n"), ("robots.txt", ROBOTS)]);
    let package = PackageDescriptor::new("evil/pkg", env.project_path("vendor/evil"))
        .with_mapping(ScaffoldMapping::replace("web/robots.txt", "robots.txt"))
        .with_mappings(mappings);
    ScaffoldUseCase::new(TomlManifestRepository::new(), LocalFs::new())
        .scaffold(&[package], &ScaffoldOptions::new(env.root()))
        .unwrap()
}

#[test]
fn scenario_traversal_destination_is_refused() {
    let env = TestEnv::new();

    let result = run(&env, vec![ScaffoldMapping::replace("../../etc/passwd", "payload")]);

    assert_eq!(result.exit_code(), 1);
    assert_eq!(result.path_violations.len(), 1);
    assert!(matches!(
        result.path_violations[0].error,
        PathError::ContainsTraversal { .. }
    ));
    assert_eq!(result.applied_count(), 0);
    assert_not_scaffolded!(env, "web/robots.txt");
    assert!(env.manifest_text().is_none());
}

#[test]
fn scenario_absolute_destination_is_refused() {
    let env = TestEnv::new();

    let result = run(&env, vec![ScaffoldMapping::replace("/etc/passwd", "payload")]);

    assert_eq!(result.exit_code(), 1);
    assert!(matches!(
        result.path_violations[0].error,
        PathError::AbsoluteNotAllowed { .. }
    ));
    assert_not_scaffolded!(env, "web/robots.txt");
}

#[test]
fn scenario_escaping_source_is_refused() {
    let env = TestEnv::new();

    let result = run(
        &env,
        vec![ScaffoldMapping::replace("web/passwd.txt", "../../../../etc/passwd")],
    );

    assert_eq!(result.exit_code(), 1);
    assert!(!result.path_violations.is_empty());
    assert_not_scaffolded!(env, "web/passwd.txt");
    assert_not_scaffolded!(env, "web/robots.txt");
}

#[cfg(unix)]
#[test]
fn scenario_symlinked_directory_is_not_followed() {
    let env = TestEnv::new();
    let outside = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(outside.path(), env.project_path("web")).unwrap();

    let result = run(&env, Vec::new());

    assert_eq!(result.exit_code(), 1);
    assert!(matches!(
        result.path_violations[0].error,
        PathError::SymlinkEscape { .. }
    ));
    assert_eq!(result.applied_count(), 0);
    assert!(!outside.path().join("robots.txt").exists());
}
