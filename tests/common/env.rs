//! Test environment for isolated scaffold runs.
//!
//! Provides `TestEnv` - a temp project directory and a temp config home,
//! plus helpers to lay out vendor packages and run the `scaffold` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use scaffold_sync::domain::ports::ManifestRepository;
use scaffold_sync::infrastructure::TomlManifestRepository;
use scaffold_sync::{Manifest, MANIFEST_FILE};
use tempfile::TempDir;

/// Result of running the scaffold CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout of a `--json` run
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

/// Isolated project plus config home
pub struct TestEnv {
    pub project_root: TempDir,
    pub config_home: TempDir,
    bin: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("create project dir"),
            config_home: TempDir::new().expect("create config home"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_scaffold")),
        }
    }

    pub fn root(&self) -> &Path {
        self.project_root.path()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `scaffold.toml`
    pub fn write_config(&self, content: &str) {
        self.write_project_file("scaffold.toml", content);
    }

    /// Lay out files under `vendor/<name>/`
    pub fn write_package(&self, name: &str, files: &[(&str, &str)]) {
        for (relative, content) in files {
            self.write_project_file(&format!("vendor/{}/{}", name, relative), content);
        }
    }

    pub fn remove_package(&self, name: &str) {
        let dir = self.project_path(&format!("vendor/{}", name));
        if dir.exists() {
            std::fs::remove_dir_all(dir).expect("remove package dir");
        }
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative: &str, content: &str) {
        let full_path = self.project_path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn manifest_text(&self) -> Option<String> {
        std::fs::read_to_string(self.project_path(MANIFEST_FILE)).ok()
    }

    pub fn manifest(&self) -> Manifest {
        TomlManifestRepository::new()
            .load(&self.project_path(MANIFEST_FILE))
            .expect("manifest loads")
    }

    /// Run scaffold with the project root as the last argument
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args)
            .arg(self.root())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("SCAFFOLD_ALLOW_OVERWRITE")
            .env_remove("SCAFFOLD_STRICT")
            .env_remove("SCAFFOLD_LOG");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute scaffold");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
