//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `gut-build` command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and calls into the
//!   `gut_build` library to do the work.

pub mod prepare;
pub mod rewrite;
pub mod sync;
