//! # gut-build Library
//!
//! This library mirrors the upstream git sources into a local working copy
//! pinned to a revision, then rebrands the copy by rewriting every `git`
//! identifier as `gut`. It backs the `gut-build` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use gut_build::policy::Rewriter;
//!
//! let rewriter = Rewriter::gut();
//! assert_eq!(rewriter.rename("git-compat-util.h"), "gut-compat-util.h");
//! assert_eq!(
//!     rewriter.rewrite_contents("ctype.c", "if (isdigit(c)) git_die();"),
//!     "if (isdigit(c)) gut_die();"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Rewrite policy (`policy`)**: the ordered substitution rules and the
//!   per-file patches that turn `git` into `gut` without breaking words like
//!   `digit` or hand-optimized character checks.
//! - **Tree rewriting (`rewrite`)**: the in-place, rename-then-recurse walk
//!   that applies a policy to a directory tree, skipping `.git*` entries and
//!   binary files.
//! - **Mirror synchronization (`mirror`, `guard`, `git`)**: clone, fetch,
//!   and hard-reset a checkout to an exact revision, refusing to touch a
//!   directory whose remote does not match.
//! - **Command runner (`runner`)**: the seam through which every `git`
//!   process is spawned, faked out in tests.
//! - **Layout and configuration (`folders`, `config`, `defaults`)**: where
//!   the checkouts live and which revisions they track.
//!
//! ## Execution Flow
//!
//! [`prepare::prepare`] runs the whole pipeline for one platform:
//!
//! 1.  **Provision**: create the workspace directories.
//! 2.  **Synchronize**: bring each mirror to its pinned revision.
//! 3.  **Rewrite**: rebrand the source checkout in place.
//!
//! Every step is idempotent. A run that fails part way is recovered by
//! running it again.

pub mod config;
pub mod defaults;
pub mod error;
pub mod folders;
pub mod git;
pub mod guard;
pub mod mirror;
pub mod policy;
pub mod prepare;
pub mod rewrite;
pub mod runner;

#[cfg(test)]
mod policy_proptest;
