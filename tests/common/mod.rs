//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_file("git.c", "git\n");
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git, git_available, snapshot, GitFixture, TestFixture};
}

/// A temporary directory tree to rewrite.
#[allow(dead_code)]
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Add a text file, creating parent directories as needed.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir.child(path).write_str(content).unwrap();
        self
    }

    /// Add a file with raw bytes.
    pub fn with_bytes(self, path: &str, content: &[u8]) -> Self {
        self.temp_dir.child(path).write_binary(content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).unwrap()
    }
}

/// Every file under `root` with its bytes, sorted by relative path.
#[allow(dead_code)]
pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files: Vec<(PathBuf, Vec<u8>)> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, std::fs::read(e.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}

/// Whether a `git` binary is on PATH.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run git in `dir`, panicking on failure; returns trimmed stdout.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A local upstream repository plus a workspace to mirror it into.
///
/// The upstream is reachable through a `file://` URL, so no network is needed.
#[allow(dead_code)]
pub struct GitFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl GitFixture {
    /// An upstream with one commit tagged `v1.0`.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        let upstream = temp_dir.path().join("upstream");
        std::fs::create_dir_all(&upstream).unwrap();

        git(&upstream, &["init", "--quiet"]);
        std::fs::write(upstream.join("git.c"), "int main() { return git_main(); }\n").unwrap();
        std::fs::write(upstream.join("README"), "Git v1\n").unwrap();
        git(&upstream, &["add", "."]);
        git(&upstream, &["commit", "--quiet", "-m", "v1"]);
        git(&upstream, &["tag", "v1.0"]);

        Self { temp_dir }
    }

    pub fn upstream(&self) -> PathBuf {
        self.temp_dir.path().join("upstream")
    }

    pub fn url(&self) -> String {
        format!("file://{}", self.upstream().display())
    }

    pub fn workspace(&self) -> PathBuf {
        self.temp_dir.path().join("workspace")
    }

    pub fn checkout(&self) -> PathBuf {
        self.workspace().join("gut-src")
    }

    /// Add a commit upstream and tag it.
    pub fn commit_upstream(&self, file: &str, content: &str, tag: &str) {
        let upstream = self.upstream();
        std::fs::write(upstream.join(file), content).unwrap();
        git(&upstream, &["add", "."]);
        git(&upstream, &["commit", "--quiet", "-m", tag]);
        git(&upstream, &["tag", tag]);
    }
}
