//! # Tree Rewriting
//!
//! Applies a [`Rewriter`] to a directory tree in place.
//!
//! The walk is depth-first over a snapshot of each directory's listing.
//! For every entry:
//!
//! 1.  Names starting with [`RESERVED_PREFIX`] (`.git`, `.gitignore`,
//!     `.gitattributes`, ...) are skipped entirely: not renamed, not read, not
//!     descended into.
//! 2.  The name is run through the policy; if it changes, the entry is
//!     renamed on disk before anything else, and the new path is used from
//!     then on. An entry already sitting at the new name is never replaced;
//!     the walk stops with an error instead.
//! 3.  Directories are descended into.
//! 4.  Regular files are read. Content that is not valid UTF-8 is left
//!     alone. Otherwise the policy and any patch for the new file name are
//!     applied, and the file is written back only if something changed.
//!
//! Symlinks are renamed like any other entry but never followed.
//!
//! A second pass over an already rewritten tree changes nothing. Any I/O
//! error stops the walk immediately; entries already processed stay
//! rewritten, and running again finishes the job.
//!
//! [`plan_tree`] reports what [`rewrite_tree`] would do without touching the
//! disk.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::policy::Rewriter;

/// Entries whose name begins with this are version-control metadata.
pub const RESERVED_PREFIX: &str = ".git";

/// Mode for files created by the rewrite.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Counters collected by [`rewrite_tree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub directories: usize,
    pub renamed: usize,
    pub rewritten: usize,
    pub skipped_binary: usize,
}

impl RewriteReport {
    /// Whether the pass changed anything on disk.
    pub fn is_noop(&self) -> bool {
        self.renamed == 0 && self.rewritten == 0
    }
}

/// A change [`rewrite_tree`] would make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedChange {
    /// Rename `from` (current path) to `to` (same directory, new name).
    Rename { from: PathBuf, to: PathBuf },
    /// Rewrite the contents of the file currently at `path`.
    Rewrite { path: PathBuf },
}

fn is_reserved(name: &std::ffi::OsStr) -> bool {
    name.as_encoded_bytes().starts_with(RESERVED_PREFIX.as_bytes())
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Rewrite {
        path: path.to_path_buf(),
        source,
    }
}

/// Rewrite every name and text file under `root` in place.
pub fn rewrite_tree(root: &Path, rewriter: &Rewriter) -> Result<RewriteReport> {
    log::info!("Rewriting {}...", root.display());
    let mut report = RewriteReport::default();
    rewrite_dir(root, rewriter, &mut report)?;
    log::info!(
        "Rewrote {} files and renamed {} entries under {}",
        report.rewritten,
        report.renamed,
        root.display()
    );
    Ok(report)
}

fn rewrite_dir(dir: &Path, rewriter: &Rewriter, report: &mut RewriteReport) -> Result<()> {
    report.directories += 1;

    let mut entries = fs::read_dir(dir)
        .map_err(io_err(dir))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_err(dir))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let orig_name = entry.file_name();
        if is_reserved(&orig_name) {
            continue;
        }

        let orig_path = entry.path();
        let file_type = entry.file_type().map_err(io_err(&orig_path))?;

        let (path, name) = match orig_name.to_str() {
            Some(orig) => {
                let name = rewriter.rename(orig);
                let path = dir.join(&name);
                if name != orig {
                    rename_entry(&orig_path, &path)?;
                    log::debug!("renamed {} -> {}", orig_path.display(), name);
                    report.renamed += 1;
                }
                (path, name)
            }
            None => {
                log::debug!("leaving non-UTF-8 name {} as is", orig_path.display());
                (orig_path, orig_name.to_string_lossy().into_owned())
            }
        };

        if file_type.is_dir() {
            rewrite_dir(&path, rewriter, report)?;
        } else if file_type.is_file() {
            rewrite_file(&path, &name, rewriter, report)?;
        }
    }
    Ok(())
}

/// Rename `from` to `to`, refusing to replace an entry already at `to`.
fn rename_entry(from: &Path, to: &Path) -> Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        return Err(Error::Rewrite {
            path: from.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", to.display()),
            ),
        });
    }
    fs::rename(from, to).map_err(io_err(from))
}

fn rewrite_file(
    path: &Path,
    name: &str,
    rewriter: &Rewriter,
    report: &mut RewriteReport,
) -> Result<()> {
    let bytes = fs::read(path).map_err(io_err(path))?;
    let Ok(original) = String::from_utf8(bytes) else {
        log::trace!("skipping binary {}", path.display());
        report.skipped_binary += 1;
        return Ok(());
    };

    let contents = rewriter.rewrite_contents(name, &original);
    if contents != original {
        write_contents(path, &contents).map_err(io_err(path))?;
        log::trace!("rewrote {}", path.display());
        report.rewritten += 1;
    }
    Ok(())
}

/// Truncate and write `path`; existing files keep their permission bits.
fn write_contents(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())
}

/// List the changes [`rewrite_tree`] would make under `root`.
///
/// Paths are reported as they exist now, before any rename; a rename
/// planned for a directory does not alter the paths reported beneath it.
pub fn plan_tree(root: &Path, rewriter: &Rewriter) -> Result<Vec<PlannedChange>> {
    let mut changes = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_reserved(e.file_name()));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::Rewrite {
                path,
                source: e.into(),
            }
        })?;
        let path = entry.path();

        let name = match entry.file_name().to_str() {
            Some(orig) => {
                let name = rewriter.rename(orig);
                if name != orig {
                    changes.push(PlannedChange::Rename {
                        from: path.to_path_buf(),
                        to: path.with_file_name(&name),
                    });
                }
                name
            }
            None => entry.file_name().to_string_lossy().into_owned(),
        };

        if entry.file_type().is_file() {
            let bytes = fs::read(path).map_err(io_err(path))?;
            if let Ok(original) = std::str::from_utf8(&bytes) {
                if rewriter.rewrite_contents(&name, original) != original {
                    changes.push(PlannedChange::Rewrite {
                        path: path.to_path_buf(),
                    });
                }
            }
        }
    }
    Ok(changes)
}
