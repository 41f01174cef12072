//! Scenario: One Package Overrides Another
//!
//! Journey: two packages provide `web/robots.txt`; the later one declares an
//! override. Declaration order must not matter.

use scaffold_sync::application::ScaffoldOptions;
use scaffold_sync::infrastructure::{LocalFs, TomlManifestRepository};
use scaffold_sync::{ContentHash, DestinationPath, PackageDescriptor, ScaffoldMapping, ScaffoldUseCase};

use crate::common::*;
use crate::{assert_exit, assert_scaffolded};

fn packages(env: &TestEnv, override_first: bool) -> Vec<PackageDescriptor> {
    env.write_package("vendor-a", &[("robots.txt", "A-content")]);
    env.write_package("vendor-b", &[("robots.txt", "B-content")]);

    let a = PackageDescriptor::new("vendor/a", env.project_path("vendor/vendor-a"))
        .with_weight(1)
        .with_mapping(ScaffoldMapping::replace("web/robots.txt", "robots.txt"));
    let b = PackageDescriptor::new("vendor/b", env.project_path("vendor/vendor-b"))
        .with_weight(2)
        .with_mapping(ScaffoldMapping::replace("web/robots.txt", "robots.txt").with_override());

    if override_first {
        vec![b, a]
    } else {
        vec![a, b]
    }
}

#[test]
fn scenario_override_wins_in_any_order() {
    for override_first in [false, true] {
        let env = TestEnv::new();
        let use_case = ScaffoldUseCase::new(TomlManifestRepository::new(), LocalFs::new());

        let result = use_case
            .scaffold(&packages(&env, override_first), &ScaffoldOptions::new(env.root()))
            .unwrap();

        assert_eq!(result.exit_code(), 0);
        assert_scaffolded!(env, "web/robots.txt", "B-content");

        let manifest = env.manifest();
        let entry = manifest
            .get(&DestinationPath::new("web/robots.txt").unwrap())
            .unwrap();
        assert_eq!(entry.package(), "vendor/b");
        assert_eq!(entry.hash(), &ContentHash::from_content("B-content"));
    }
}

#[test]
fn scenario_override_through_cli() {
    let env = TestEnv::new();
    env.write_config(SITE_CONFIG);
    site_packages(&env);

    let result = env.run(&[]);

    assert_exit!(result, 0);
    assert_scaffolded!(env, "web/robots.txt", "User-agent: *\nAllow: /\n");
    let manifest = env.manifest();
    let entry = manifest
        .get(&DestinationPath::new("web/robots.txt").unwrap())
        .unwrap();
    assert_eq!(entry.package(), "acme/site");
}
