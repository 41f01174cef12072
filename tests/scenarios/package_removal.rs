//! Scenario: A Package Is Removed
//!
//! Journey: two packages scaffold files; one is uninstalled, and the user
//! had edited one of its files in the meantime.
//!
//! Success Criteria:
//! - Untouched files of the removed package are deleted
//! - The edited file stays, with a warning
//! - Neither remains in the manifest

use crate::common::*;
use crate::{assert_exit, assert_not_scaffolded, assert_scaffolded};

const TWO_PACKAGES: &str = r#"
[[package]]
name = "acme/core"
path = "vendor/acme/core"

[package.file-mapping]
"robots.txt" = "robots.txt"

[[package]]
name = "acme/extras"
path = "vendor/acme/extras"

[package.file-mapping]
"humans.txt" = "humans.txt"
"ads.txt" = "ads.txt"
"#;

const CORE_ONLY: &str = r#"
[[package]]
name = "acme/core"
path = "vendor/acme/core"

[package.file-mapping]
"robots.txt" = "robots.txt"
"#;

#[test]
fn scenario_removed_package_is_cleaned_up() {
    let env = TestEnv::new();
    env.write_config(TWO_PACKAGES);
    env.write_package("acme/core", &[("robots.txt", ROBOTS)]);
    env.write_package(
        "acme/extras",
        &[("humans.txt", "/* TEAM */\n"), ("ads.txt", "example.com, 1\n")],
    );
    assert_exit!(env.run(&[]), 0);
    assert_scaffolded!(env, "humans.txt");

    env.write_project_file("ads.txt", "example.com, 1\nmine.example, 2\n");
    env.remove_package("acme/extras");
    env.write_config(CORE_ONLY);

    let result = env.run(&["--json"]);

    assert_exit!(result, 0);
    assert_not_scaffolded!(env, "humans.txt");
    assert_scaffolded!(env, "ads.txt", "example.com, 1\nmine.example, 2\n");
    assert_scaffolded!(env, "robots.txt", ROBOTS);

    let json = result.json();
    assert_eq!(json["deleted"][0], "humans.txt");
    assert_eq!(json["kept"][0], "ads.txt");
    assert_eq!(env.manifest().managed_paths(), vec!["robots.txt"]);
}

#[test]
fn scenario_removal_preview_deletes_nothing() {
    let env = TestEnv::new();
    env.write_config(TWO_PACKAGES);
    env.write_package("acme/core", &[("robots.txt", ROBOTS)]);
    env.write_package(
        "acme/extras",
        &[("humans.txt", "/* TEAM */\n"), ("ads.txt", "example.com, 1\n")],
    );
    assert_exit!(env.run(&[]), 0);
    env.write_config(CORE_ONLY);

    let result = env.run(&["--dry-run", "--json"]);

    assert_exit!(result, 0);
    assert_eq!(result.json()["counts"]["deleted"], 2);
    assert_scaffolded!(env, "humans.txt");
    assert_scaffolded!(env, "ads.txt");
}
