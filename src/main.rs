//! # gut-build CLI
//!
//! This is the binary entry point for the `gut-build` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the appropriate command and reporting its errors.
//!
//! The core logic lives in the `gut_build` library crate; the binary only
//! supplies paths, URLs and versions to it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
