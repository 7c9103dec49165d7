//! # Build Preparation
//!
//! Produces a rebranded source tree ready to build, for one platform:
//!
//! - **Unix**: mirror upstream git into `gut-src`, then rewrite it.
//! - **Windows**: mirror the msysgit SDK into `msysgit` and Git for Windows
//!   into `gut-win-src`, then rewrite `gut-win-src`. The SDK is only
//!   mirrored, never rewritten.
//!
//! Each step finishes before the next starts. Both steps are idempotent, so
//! a failed run is recovered by running it again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::folders::Layout;
use crate::mirror::MirrorSynchronizer;
use crate::rewrite::{self, RewriteReport};

/// Which source tree to prepare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Unix => write!(f, "unix"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "unix" | "linux" | "macos" | "darwin" => Ok(Platform::Unix),
            "windows" | "win" => Ok(Platform::Windows),
            other => Err(Error::ConfigParse {
                message: format!("unknown platform '{other}'"),
                hint: Some("use 'unix' or 'windows'".to_string()),
            }),
        }
    }
}

/// Mirror and rewrite the sources for `platform`.
///
/// `sync` decides where the workspace is; its layout supplies every
/// checkout path.
pub fn prepare(
    config: &Config,
    platform: Platform,
    sync: &MirrorSynchronizer,
) -> Result<RewriteReport> {
    let layout: &Layout = sync.layout();
    let rewriter = config.rewriter();
    log::info!(
        "Preparing {} sources in {}",
        platform,
        layout.root().display()
    );

    let src = match platform {
        Platform::Unix => {
            let src = layout.src();
            sync.sync(&config.unix.target(&src))?;
            src
        }
        Platform::Windows => {
            sync.sync(&config.windows.msysgit.target(layout.msysgit()))?;
            let src = layout.win_src();
            sync.sync(&config.windows.git.target(&src))?;
            src
        }
    };

    rewrite::rewrite_tree(&src, &rewriter)
}
