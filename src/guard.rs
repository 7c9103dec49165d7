//! # Guarded Destructive Reset
//!
//! `git reset --hard` followed by `git clean -fdx` throws away uncommitted
//! work and every untracked file. Before running them against a directory we
//! check that the checkout's remotes actually mention the repository we
//! expect; if they don't, we stop with [`Error::WrongRepository`] and leave
//! the directory alone.

use std::path::Path;

use crate::error::{Error, Result};
use crate::git;
use crate::runner::CommandRunner;

/// Fail unless `git remote -v` at `dir` contains `expected_url`.
///
/// A blank `expected_url` matches nothing.
pub fn verify_origin(runner: &dyn CommandRunner, dir: &Path, expected_url: &str) -> Result<()> {
    let remotes = git::remotes(runner, dir)?;
    if expected_url.trim().is_empty() || !remotes.contains(expected_url) {
        log::warn!(
            "{} does not look like a checkout of {}; not resetting",
            dir.display(),
            expected_url
        );
        return Err(Error::WrongRepository {
            path: dir.to_path_buf(),
            expected: expected_url.to_string(),
            remotes,
        });
    }
    Ok(())
}

/// Reset `dir` to exactly `version` and remove everything untracked.
///
/// The clean only runs if the reset succeeded.
pub fn hard_reset_and_clean(
    runner: &dyn CommandRunner,
    dir: &Path,
    repo_url: &str,
    version: &str,
) -> Result<()> {
    verify_origin(runner, dir, repo_url)?;
    git::reset_hard(runner, dir, version)?;
    git::clean(runner, dir)
}
