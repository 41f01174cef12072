//! Reusable package content and configuration snippets.

pub const ROBOTS: &str = "User-agent: *\nDisallow: /admin\n";
pub const HTACCESS: &str = "Options -Indexes\n";
pub const SETTINGS_BASE: &str = "<?php\n$settings = [];\n";
pub const SETTINGS_TAIL: &str = "$settings['hash_salt'] = 'x';\n";

/// One core package providing two web-root files
pub const CORE_CONFIG: &str = r#"
[locations]
web-root = "web"

[[package]]
name = "acme/core"
path = "vendor/acme/core"

[package.file-mapping]
"[web-root]/robots.txt" = "assets/robots.txt"
"[web-root]/.htaccess" = "assets/htaccess"
"#;

/// Lay out the files `CORE_CONFIG` refers to
pub fn core_package(env: &super::TestEnv) {
    env.write_package(
        "acme/core",
        &[("assets/robots.txt", ROBOTS), ("assets/htaccess", HTACCESS)],
    );
}

/// Core plus a site package that appends to settings and overrides robots.txt
pub const SITE_CONFIG: &str = r#"
[locations]
web-root = "web"

[[package]]
name = "acme/core"
path = "vendor/acme/core"

[package.file-mapping]
"[web-root]/robots.txt" = "assets/robots.txt"
"[web-root]/.htaccess" = "assets/htaccess"
"[web-root]/settings.php" = "assets/settings.php"

[[package]]
name = "acme/site"
path = "vendor/acme/site"

[package.file-mapping]
"[web-root]/robots.txt" = { path = "robots.txt", override = true }
"[web-root]/settings.php" = { mode = "append", path = "settings-tail.php" }
"#;

pub fn site_packages(env: &super::TestEnv) {
    env.write_package(
        "acme/core",
        &[
            ("assets/robots.txt", ROBOTS),
            ("assets/htaccess", HTACCESS),
            ("assets/settings.php", SETTINGS_BASE),
        ],
    );
    env.write_package(
        "acme/site",
        &[
            ("robots.txt", "User-agent: *\nAllow: /\n"),
            ("settings-tail.php", SETTINGS_TAIL),
        ],
    );
}
