//! Thin wrappers over the handful of `git` subcommands the mirror needs.
//!
//! Each function runs one command through a [`CommandRunner`] and turns a
//! launch failure or an unsuccessful exit into an [`Error`]. Nothing here
//! decides *when* to run a command; that is the job of `mirror` and `guard`.

use std::path::Path;

use crate::error::{Error, Result};
use crate::runner::{CommandOutput, CommandRunner};

const GIT: &str = "git";

/// Run `git <args>` and return its output, whatever the exit status.
fn run(runner: &dyn CommandRunner, args: &[&str], dir: Option<&Path>) -> Result<CommandOutput> {
    runner
        .run(GIT, args, dir)
        .map_err(|source| Error::GitLaunch {
            command: args.join(" "),
            source,
        })
}

/// Run `git <args>` and fail unless it exits with status zero.
fn run_checked(
    runner: &dyn CommandRunner,
    args: &[&str],
    dir: Option<&Path>,
) -> Result<CommandOutput> {
    let output = run(runner, args, dir)?;
    if !output.is_success() {
        return Err(Error::GitCommand {
            command: args.join(" "),
            dir: dir.unwrap_or_else(|| Path::new(".")).to_path_buf(),
            status: output.status,
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output)
}

/// Full clone of `url` into `dest`.
pub fn clone(runner: &dyn CommandRunner, url: &str, dest: &Path) -> Result<()> {
    let dest = dest.to_string_lossy();
    run_checked(runner, &["clone", "--progress", url, &*dest], None)?;
    Ok(())
}

/// Turn off line-ending translation for the checkout at `dir`.
///
/// A mirror checked out on Windows with CRLF endings and later synced to a
/// unix machine breaks shell scripts and patches there.
pub fn disable_autocrlf(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    run_checked(runner, &["config", "core.autocrlf", "false"], Some(dir))?;
    Ok(())
}

/// Whether `rev` names an object already present in the local history.
///
/// A non-zero exit from `git rev-parse` means "not known here" and is not an
/// error; only a launch failure is.
pub fn rev_parse(runner: &dyn CommandRunner, dir: &Path, rev: &str) -> Result<bool> {
    let output = run(runner, &["rev-parse", rev], Some(dir))?;
    Ok(output.is_success())
}

/// Fetch new history from the default remote.
pub fn fetch(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    run_checked(runner, &["fetch"], Some(dir))?;
    Ok(())
}

/// Raw `git remote -v` output.
pub fn remotes(runner: &dyn CommandRunner, dir: &Path) -> Result<String> {
    let output = run_checked(runner, &["remote", "-v"], Some(dir))?;
    Ok(output.stdout)
}

/// Move the working tree and index to `rev`, discarding local changes.
pub fn reset_hard(runner: &dyn CommandRunner, dir: &Path, rev: &str) -> Result<()> {
    run_checked(runner, &["reset", "--quiet", "--hard", rev], Some(dir))?;
    Ok(())
}

/// Delete untracked and ignored files and directories.
pub fn clean(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    run_checked(runner, &["clean", "-fdxq"], Some(dir))?;
    Ok(())
}
