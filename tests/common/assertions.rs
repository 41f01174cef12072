//! Assertion macros for CLI and scenario tests.

use std::path::Path;

/// List all files in a directory recursively (for failure messages)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files
}

/// Assert that a destination exists with the given content.
///
/// ```ignore
/// assert_scaffolded!(env, "web/robots.txt", "User-agent: *\n");
/// ```
#[macro_export]
macro_rules! assert_scaffolded {
    ($env:expr, $path:expr) => {
        let full_path = $env.project_path($path);
        assert!(
            full_path.exists(),
            "Expected file at '{}', but it doesn't exist.\nFiles found:\n  {}",
            $path,
            $crate::common::list_all_files($env.root()).join("\n  ")
        );
    };
    ($env:expr, $path:expr, $content:expr) => {
        $crate::assert_scaffolded!($env, $path);
        assert_eq!($env.read($path), $content, "unexpected content in '{}'", $path);
    };
}

/// Assert that a destination does not exist.
#[macro_export]
macro_rules! assert_not_scaffolded {
    ($env:expr, $path:expr) => {
        assert!(
            !$env.project_path($path).exists(),
            "Expected '{}' to NOT exist, but it does.",
            $path
        );
    };
}

/// Assert the exit code, printing both streams on mismatch.
#[macro_export]
macro_rules! assert_exit {
    ($result:expr, $code:expr) => {
        assert_eq!(
            $result.exit_code,
            $code,
            "unexpected exit code.\nstdout:\n{}\nstderr:\n{}",
            $result.stdout,
            $result.stderr
        );
    };
}
