//! Default values for gut-build configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Upstream git.
pub const GIT_REPO_URL: &str = "https://github.com/git/git.git";
/// Tag of upstream git to build from.
pub const GIT_VERSION: &str = "v2.45.2";

/// Git for Windows.
pub const GIT_WIN_REPO_URL: &str = "https://github.com/git-for-windows/git.git";
pub const GIT_WIN_VERSION: &str = "v2.45.2.windows.1";

/// The msysgit build environment for Windows.
pub const MSYSGIT_REPO_URL: &str = "https://github.com/msysgit/msysgit.git";
pub const MSYSGIT_VERSION: &str = "Git-1.9.5-preview20150319";

/// Config file looked up in the current directory when `--config` is not given.
pub const CONFIG_FILE: &str = "gut-build.yaml";

/// Returns the default workspace root.
///
/// Uses `~/.gut-build`, falling back to `.gut-build` in the current
/// directory if the home directory cannot be determined.
///
/// This can be overridden by the `--workspace` CLI flag, the
/// `GUT_BUILD_WORKSPACE` environment variable, or the `workspace` key of the
/// config file.
pub fn default_workspace() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".gut-build"))
        .unwrap_or_else(|| PathBuf::from(".gut-build"))
}
