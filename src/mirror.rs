//! # Mirror Synchronization
//!
//! Brings a local checkout to an exact upstream revision.
//!
//! [`MirrorSynchronizer::sync`] is idempotent: running it again with the same
//! [`MirrorTarget`] converges on the same working copy. The steps are:
//!
//! 1.  Make sure the workspace directories exist.
//! 2.  Clone the repository, unless `<path>/.git` is already there.
//! 3.  Set `core.autocrlf=false` on the checkout.
//! 4.  Probe the target revision with `git rev-parse`; fetch only if it is
//!     unknown locally (or always, under [`FetchPolicy::Always`]).
//! 5.  Verify the checkout's remote and hard-reset and clean it to the
//!     revision (see [`crate::guard`]).
//!
//! The first failing step aborts the sync and its error is returned as-is.
//! Whatever was already done on disk stays done.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::folders::Layout;
use crate::git;
use crate::guard;
use crate::runner::{CommandRunner, SystemRunner};

/// Directory whose presence marks a path as already cloned.
const GIT_DIR: &str = ".git";

/// A repository pinned to a revision, checked out at a local path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorTarget {
    pub url: String,
    pub version: String,
    pub path: PathBuf,
}

impl MirrorTarget {
    pub fn new(url: &str, version: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.to_string(),
            version: version.to_string(),
            path: path.into(),
        }
    }
}

/// When to fetch before resetting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Fetch only if `git rev-parse <version>` fails locally.
    ///
    /// Right for tags and commit ids. A branch name that already resolves
    /// will not be refreshed.
    #[default]
    IfMissing,
    /// Fetch on every sync, for moving refs such as branch names.
    Always,
}

/// Keeps local checkouts aligned with pinned upstream revisions.
pub struct MirrorSynchronizer {
    runner: Box<dyn CommandRunner>,
    layout: Layout,
    fetch_policy: FetchPolicy,
}

impl MirrorSynchronizer {
    /// A synchronizer that runs the system `git`.
    pub fn new(layout: Layout) -> Self {
        Self::with_runner(Box::new(SystemRunner), layout)
    }

    /// A synchronizer with a custom command runner.
    ///
    /// Used by tests to inject a fake `git`.
    pub fn with_runner(runner: Box<dyn CommandRunner>, layout: Layout) -> Self {
        Self {
            runner,
            layout,
            fetch_policy: FetchPolicy::default(),
        }
    }

    pub fn fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Clone or update `target.path` and reset it to `target.version`.
    pub fn sync(&self, target: &MirrorTarget) -> Result<()> {
        let runner = self.runner.as_ref();
        let path = target.path.as_path();

        self.layout.ensure()?;

        if !path.join(GIT_DIR).try_exists()? {
            log::info!("Cloning {} into {}...", target.url, path.display());
            git::clone(runner, &target.url, path)?;
        } else {
            log::debug!("{} is already cloned", path.display());
        }

        git::disable_autocrlf(runner, path)?;

        let needs_fetch = match self.fetch_policy {
            FetchPolicy::Always => true,
            FetchPolicy::IfMissing => !git::rev_parse(runner, path, &target.version)?,
        };
        if needs_fetch {
            log::info!(
                "Fetching latest from {} in order to upgrade to {}...",
                target.url,
                target.version
            );
            git::fetch(runner, path)?;
        }

        log::info!("Checking out {}...", target.version);
        guard::hard_reset_and_clean(runner, path, &target.url, &target.version)?;
        log::info!("{} is at {}", path.display(), target.version);
        Ok(())
    }
}
