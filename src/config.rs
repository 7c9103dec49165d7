//! # Configuration
//!
//! The optional `gut-build.yaml` file tells `prepare` where to work and which
//! upstream revisions to mirror. Every key is optional; an absent file or an
//! empty one yields the built-in defaults from [`crate::defaults`].
//!
//! ```yaml
//! workspace: /srv/gut-build
//! fetch: always            # or if-missing (default)
//! unix:
//!   url: https://github.com/git/git.git
//!   version: v2.45.2
//! windows:
//!   git:
//!     url: https://github.com/git-for-windows/git.git
//!     version: v2.45.2.windows.1
//!   msysgit:
//!     url: https://github.com/msysgit/msysgit.git
//!     version: Git-1.9.5-preview20150319
//! rewrite:                 # replaces the built-in git -> gut policy
//!   rules:
//!     - { from: git, to: gut }
//!   patches:
//!     - { file: read-cache.c, from: "'i'", to: "'u'" }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::error::{Error, Result};
use crate::mirror::{FetchPolicy, MirrorTarget};
use crate::policy::{PolicyFile, Rewriter};

/// An upstream repository pinned to a revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mirror {
    pub url: String,
    pub version: String,
}

impl Mirror {
    pub fn new(url: &str, version: &str) -> Self {
        Self {
            url: url.to_string(),
            version: version.to_string(),
        }
    }

    /// Bind this mirror to a local checkout path.
    pub fn target(&self, path: impl Into<PathBuf>) -> MirrorTarget {
        MirrorTarget::new(&self.url, &self.version, path)
    }

    fn validate(&self, key: &str) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: format!("'{key}.url' is empty"),
                hint: Some("Set it to the repository to mirror".to_string()),
            });
        }
        if self.version.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: format!("'{key}.version' is empty"),
                hint: Some("Use a tag or commit id, e.g. v2.45.2".to_string()),
            });
        }
        Ok(())
    }
}

fn default_unix() -> Mirror {
    Mirror::new(defaults::GIT_REPO_URL, defaults::GIT_VERSION)
}

fn default_win_git() -> Mirror {
    Mirror::new(defaults::GIT_WIN_REPO_URL, defaults::GIT_WIN_VERSION)
}

fn default_msysgit() -> Mirror {
    Mirror::new(defaults::MSYSGIT_REPO_URL, defaults::MSYSGIT_VERSION)
}

/// Mirrors needed for a Windows build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowsMirrors {
    #[serde(default = "default_win_git")]
    pub git: Mirror,
    #[serde(default = "default_msysgit")]
    pub msysgit: Mirror,
}

impl Default for WindowsMirrors {
    fn default() -> Self {
        Self {
            git: default_win_git(),
            msysgit: default_msysgit(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Workspace root; `None` means [`defaults::default_workspace`].
    #[serde(default)]
    pub workspace: Option<PathBuf>,
    #[serde(default)]
    pub fetch: FetchPolicy,
    #[serde(default = "default_unix")]
    pub unix: Mirror,
    #[serde(default)]
    pub windows: WindowsMirrors,
    /// Replacement rewrite policy.
    #[serde(default)]
    pub rewrite: Option<PolicyFile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: None,
            fetch: FetchPolicy::default(),
            unix: default_unix(),
            windows: WindowsMirrors::default(),
            rewrite: None,
        }
    }
}

impl Config {
    /// The workspace root this config points at.
    pub fn workspace(&self) -> PathBuf {
        self.workspace
            .clone()
            .unwrap_or_else(defaults::default_workspace)
    }

    /// The rewriter to apply: the inline policy if present, else `git` → `gut`.
    pub fn rewriter(&self) -> Rewriter {
        match &self.rewrite {
            Some(policy) => policy.clone().into_rewriter(),
            None => Rewriter::gut(),
        }
    }

    fn validate(&self) -> Result<()> {
        self.unix.validate("unix")?;
        self.windows.git.validate("windows.git")?;
        self.windows.msysgit.validate("windows.msysgit")?;
        if let Some(policy) = &self.rewrite {
            policy.validate()?;
        }
        Ok(())
    }
}

/// Parse configuration from YAML text.
pub fn parse(yaml: &str) -> Result<Config> {
    let config = if yaml.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(
                "Known keys are: workspace, fetch, unix, windows, rewrite".to_string(),
            ),
        })?
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a YAML file.
pub fn from_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
