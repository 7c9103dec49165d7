//! Integration tests against a real `git` binary
//!
//! These tests mirror a local upstream repository through `file://` URLs, so
//! they need `git` on PATH but no network access.
//!
//! ## Running Integration Tests
//!
//! ```bash
//! # Run all tests including integration tests
//! cargo test --features integration-tests
//!
//! # Run only this file
//! cargo test --test integration_test --features integration-tests
//! ```

mod common;

use common::prelude::*;
use gut_build::config::{Config, Mirror};
use gut_build::error::Error;
use gut_build::folders::Layout;
use gut_build::guard;
use gut_build::mirror::{FetchPolicy, MirrorSynchronizer, MirrorTarget};
use gut_build::prepare::{prepare, Platform};
use gut_build::runner::SystemRunner;
use std::fs;

macro_rules! require_git {
    () => {
        if !git_available() {
            println!("Skipping: git not found on PATH");
            return;
        }
    };
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_clones_and_checks_out() {
    require_git!();
    let fixture = GitFixture::new();
    let target = MirrorTarget::new(&fixture.url(), "v1.0", fixture.checkout());
    let sync = MirrorSynchronizer::new(Layout::new(fixture.workspace()));

    sync.sync(&target).unwrap();

    let checkout = fixture.checkout();
    assert_eq!(
        fs::read_to_string(checkout.join("README")).unwrap(),
        "Git v1\n"
    );
    assert_eq!(git(&checkout, &["config", "core.autocrlf"]), "false");
    assert!(fixture.workspace().join("gut-dist").is_dir());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_discards_local_changes() {
    require_git!();
    let fixture = GitFixture::new();
    let target = MirrorTarget::new(&fixture.url(), "v1.0", fixture.checkout());
    let sync = MirrorSynchronizer::new(Layout::new(fixture.workspace()));
    sync.sync(&target).unwrap();

    let checkout = fixture.checkout();
    fs::write(checkout.join("README"), "local edit\n").unwrap();
    fs::write(checkout.join("untracked.o"), "junk").unwrap();
    fs::create_dir_all(checkout.join("build")).unwrap();

    sync.sync(&target).unwrap();

    assert_eq!(
        fs::read_to_string(checkout.join("README")).unwrap(),
        "Git v1\n"
    );
    assert!(!checkout.join("untracked.o").exists());
    assert!(!checkout.join("build").exists());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_fetches_new_revision() {
    require_git!();
    let fixture = GitFixture::new();
    let sync = MirrorSynchronizer::new(Layout::new(fixture.workspace()));
    sync.sync(&MirrorTarget::new(&fixture.url(), "v1.0", fixture.checkout()))
        .unwrap();

    fixture.commit_upstream("README", "Git v2\n", "v2.0");
    sync.sync(&MirrorTarget::new(&fixture.url(), "v2.0", fixture.checkout()))
        .unwrap();

    assert_eq!(
        fs::read_to_string(fixture.checkout().join("README")).unwrap(),
        "Git v2\n"
    );
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_always_fetch_refreshes_branch() {
    require_git!();
    let fixture = GitFixture::new();
    let branch = git(&fixture.upstream(), &["rev-parse", "--abbrev-ref", "HEAD"]);
    let remote_branch = format!("origin/{branch}");
    let sync = MirrorSynchronizer::new(Layout::new(fixture.workspace()))
        .fetch_policy(FetchPolicy::Always);
    let target = MirrorTarget::new(&fixture.url(), &remote_branch, fixture.checkout());
    sync.sync(&target).unwrap();

    fixture.commit_upstream("README", "Git v3\n", "v3.0");
    sync.sync(&target).unwrap();

    assert_eq!(
        fs::read_to_string(fixture.checkout().join("README")).unwrap(),
        "Git v3\n"
    );
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_reset_refuses_wrong_repository() {
    require_git!();
    let fixture = GitFixture::new();
    let other = assert_fs::TempDir::new().unwrap();
    git(other.path(), &["init", "--quiet"]);
    git(
        other.path(),
        &["remote", "add", "origin", "https://example.com/unrelated.git"],
    );
    fs::write(other.path().join("precious.txt"), "uncommitted work\n").unwrap();

    let err = guard::hard_reset_and_clean(&SystemRunner, other.path(), &fixture.url(), "v1.0")
        .unwrap_err();

    assert!(matches!(err, Error::WrongRepository { .. }));
    assert_eq!(
        fs::read_to_string(other.path().join("precious.txt")).unwrap(),
        "uncommitted work\n"
    );
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_unknown_revision_fails() {
    require_git!();
    let fixture = GitFixture::new();
    let sync = MirrorSynchronizer::new(Layout::new(fixture.workspace()));

    let err = sync
        .sync(&MirrorTarget::new(&fixture.url(), "v9.9.9", fixture.checkout()))
        .unwrap_err();

    assert!(matches!(err, Error::GitCommand { .. }));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_prepare_unix_end_to_end() {
    require_git!();
    let fixture = GitFixture::new();
    let config = Config {
        workspace: Some(fixture.workspace()),
        unix: Mirror::new(&fixture.url(), "v1.0"),
        ..Config::default()
    };
    let sync = MirrorSynchronizer::new(Layout::new(config.workspace()));

    prepare(&config, Platform::Unix, &sync).unwrap();
    // A second run resets the rewritten tree and rewrites it again.
    prepare(&config, Platform::Unix, &sync).unwrap();

    let checkout = fixture.checkout();
    assert_eq!(
        fs::read_to_string(checkout.join("gut.c")).unwrap(),
        "int main() { return gut_main(); }\n"
    );
    assert_eq!(
        fs::read_to_string(checkout.join("README")).unwrap(),
        "Gut v1\n"
    );
    assert!(checkout.join(".git").is_dir());
}
