//! Scenario: A Run Is Interrupted Midway
//!
//! Journey: a package update touches five files; the process is interrupted
//! after the second rename. The user reruns the hook.
//!
//! Success Criteria:
//! - Exactly two files carry the new content, the rest the old content
//! - The manifest still describes the previous run
//! - The rerun finishes the job without refusing the half-updated files

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use scaffold_sync::application::{CancellationToken, ScaffoldOptions};
use scaffold_sync::domain::ports::{FileSystem, FsResult};
use scaffold_sync::domain::services::TargetFileState;
use scaffold_sync::infrastructure::{LocalFs, TomlManifestRepository};
use scaffold_sync::{ContentHash, DestinationPath, PackageDescriptor, ScaffoldMapping, ScaffoldUseCase};

use crate::common::*;

const FILES: [&str; 5] = ["a.txt", "b.txt", "c.txt", "d.txt", "e.txt"];

/// Local filesystem that raises the cancellation flag after `limit` writes
struct InterruptingFs {
    inner: LocalFs,
    limit: usize,
    writes: AtomicUsize,
    token: CancellationToken,
}

impl FileSystem for InterruptingFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        self.inner.read(path)
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        self.inner.write_atomic(path, content)?;
        if self.writes.fetch_add(1, Ordering::SeqCst) + 1 >= self.limit {
            self.token.cancel();
        }
        Ok(())
    }

    fn symlink_atomic(&self, link: &Path, target: &Path) -> FsResult<()> {
        self.inner.symlink_atomic(link, target)
    }

    fn supports_symlinks(&self, dir: &Path) -> bool {
        self.inner.supports_symlinks(dir)
    }

    fn inspect(&self, path: &Path) -> TargetFileState {
        self.inner.inspect(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.inner.remove(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.inner.create_dir_all(path)
    }
}

fn package(env: &TestEnv, version: &str) -> Vec<PackageDescriptor> {
    let files: Vec<(String, String)> = FILES
        .iter()
        .map(|f| (f.to_string(), format!("{} {}\n", f, version)))
        .collect();
    let refs: Vec<(&str, &str)> = files.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    env.write_package("acme/bulk", &refs);

    let mut descriptor = PackageDescriptor::new("acme/bulk", env.project_path("vendor/acme/bulk"));
    for file in FILES {
        descriptor = descriptor.with_mapping(ScaffoldMapping::replace(format!("out/{}", file), file));
    }
    vec![descriptor]
}

#[test]
fn scenario_interrupt_after_two_of_five() {
    let env = TestEnv::new();
    let options = ScaffoldOptions::new(env.root());

    let plain = ScaffoldUseCase::new(TomlManifestRepository::new(), LocalFs::new());
    assert_eq!(plain.scaffold(&package(&env, "v1"), &options).unwrap().exit_code(), 0);
    let manifest_before = env.manifest_text().unwrap();

    let token = CancellationToken::new();
    let fs = InterruptingFs {
        inner: LocalFs::new(),
        limit: 2,
        writes: AtomicUsize::new(0),
        token: token.clone(),
    };
    let interrupted = ScaffoldUseCase::new(TomlManifestRepository::new(), fs).with_cancellation(token);

    let result = interrupted.scaffold(&package(&env, "v2"), &options).unwrap();

    assert_eq!(result.exit_code(), 2);
    assert_eq!(result.applied_count(), 2);
    assert_eq!(result.cancelled, 3);
    for (i, file) in FILES.iter().enumerate() {
        let expected = if i < 2 { "v2" } else { "v1" };
        assert_eq!(env.read(&format!("out/{}", file)), format!("{} {}\n", file, expected));
    }
    assert_eq!(env.manifest_text().unwrap(), manifest_before);

    let rerun = plain.scaffold(&package(&env, "v2"), &options).unwrap();

    assert_eq!(rerun.exit_code(), 0);
    assert_eq!(rerun.applied_count(), 3);
    assert_eq!(rerun.unchanged_count(), 2);
    let manifest = env.manifest();
    for file in FILES {
        let path = DestinationPath::new(&format!("out/{}", file)).unwrap();
        assert_eq!(
            manifest.get_hash(&path),
            Some(&ContentHash::from_content(&format!("{} v2\n", file)))
        );
    }
}
