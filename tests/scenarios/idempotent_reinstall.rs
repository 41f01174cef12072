//! Scenario: Reinstall Without Changes
//!
//! Journey: a site with a core package and a site package runs the install
//! hook, then runs it again after nothing changed.
//!
//! Success Criteria:
//! - First run writes the override and the assembled append file
//! - Second run writes nothing and leaves the manifest byte-identical

use crate::common::*;
use crate::{assert_exit, assert_scaffolded};

#[test]
fn scenario_second_install_is_a_no_op() {
    let env = TestEnv::new();
    env.write_config(SITE_CONFIG);
    site_packages(&env);

    let first = env.run(&["--json"]);
    assert_exit!(first, 0);
    assert_eq!(first.json()["counts"]["applied"], 3);

    assert_scaffolded!(env, "web/robots.txt", "User-agent: *\nAllow: /\n");
    assert_scaffolded!(
        env,
        "web/settings.php",
        format!("{}{}", SETTINGS_BASE, SETTINGS_TAIL)
    );
    let manifest = env.manifest_text();

    let second = env.run(&["--json"]);
    assert_exit!(second, 0);
    let json = second.json();
    assert_eq!(json["counts"]["applied"], 0);
    assert_eq!(json["counts"]["unchanged"], 3);
    assert_eq!(env.manifest_text(), manifest);
}

#[test]
fn scenario_package_update_rewrites_managed_file() {
    let env = TestEnv::new();
    env.write_config(CORE_CONFIG);
    core_package(&env);
    assert_exit!(env.run(&[]), 0);

    env.write_package("acme/core", &[("assets/robots.txt", "User-agent: *\n")]);
    let result = env.run(&["--json"]);

    assert_exit!(result, 0);
    assert_eq!(result.json()["applied"][0], "web/robots.txt");
    assert_scaffolded!(env, "web/robots.txt", "User-agent: *\n");
}

#[test]
fn scenario_user_edit_to_append_target_is_preserved() {
    let env = TestEnv::new();
    env.write_config(SITE_CONFIG);
    site_packages(&env);
    assert_exit!(env.run(&[]), 0);

    env.write_project_file("web/settings.php", "<?php\n// hand tuned\n");
    env.write_package("acme/site", &[("settings-tail.php", "$extra = 1;\n")]);
    let result = env.run(&["--json"]);

    assert_exit!(result, 0);
    assert_eq!(env.read("web/settings.php"), "<?php\n// hand tuned\n");
    let json = result.json();
    assert_eq!(json["counts"]["warned"], 1);
    assert_eq!(json["skipped"][0]["reason"], "modified since last write");
}
