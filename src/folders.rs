//! Working directory layout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Source checkout for unix builds.
pub const SRC_DIR: &str = "gut-src";
/// Source checkout for Windows builds.
pub const WIN_SRC_DIR: &str = "gut-win-src";
/// Build output.
pub const DIST_DIR: &str = "gut-dist";
/// msysgit SDK checkout used on Windows.
pub const MSYSGIT_DIR: &str = "msysgit";

/// The fixed set of directories under a workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn src(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    pub fn win_src(&self) -> PathBuf {
        self.root.join(WIN_SRC_DIR)
    }

    pub fn dist(&self) -> PathBuf {
        self.root.join(DIST_DIR)
    }

    pub fn msysgit(&self) -> PathBuf {
        self.root.join(MSYSGIT_DIR)
    }

    /// Create the source, Windows source and dist directories, including any
    /// missing parents. Directories that already exist are left as they are.
    pub fn ensure(&self) -> Result<()> {
        for dir in [self.src(), self.win_src(), self.dist()] {
            fs::create_dir_all(&dir).map_err(|source| Error::Provision {
                path: dir.clone(),
                source,
            })?;
            log::debug!("ensured {}", dir.display());
        }
        Ok(())
    }
}
