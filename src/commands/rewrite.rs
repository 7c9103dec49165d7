//! Rewrite command implementation
//!
//! Rebrands a directory tree in place, or with `--dry-run` lists what would
//! change without touching anything.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use gut_build::policy::{PolicyFile, Rewriter};
use gut_build::rewrite::{self, PlannedChange};

/// Arguments for the rewrite command
#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Root of the tree to rewrite
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// YAML policy file replacing the built-in git -> gut rules
    #[arg(long, value_name = "PATH")]
    pub policy: Option<PathBuf>,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Execute the rewrite command
pub fn execute(args: RewriteArgs) -> Result<()> {
    if !args.root.is_dir() {
        anyhow::bail!("Not a directory: {}", args.root.display());
    }

    let rewriter = match &args.policy {
        Some(path) => PolicyFile::from_file(path)
            .with_context(|| format!("Failed to load policy {}", path.display()))?
            .into_rewriter(),
        None => Rewriter::gut(),
    };

    if args.dry_run {
        let plan = rewrite::plan_tree(&args.root, &rewriter)?;
        if plan.is_empty() {
            println!("Nothing to rewrite in {}", args.root.display());
            return Ok(());
        }
        for change in &plan {
            match change {
                PlannedChange::Rename { from, to } => {
                    println!("rename  {} -> {}", from.display(), to.display())
                }
                PlannedChange::Rewrite { path } => println!("rewrite {}", path.display()),
            }
        }
        println!("{} changes planned", plan.len());
        return Ok(());
    }

    let report = rewrite::rewrite_tree(&args.root, &rewriter)?;
    println!(
        "✅ Rewrote {} files, renamed {} entries ({} binary files skipped)",
        report.rewritten, report.renamed, report.skipped_binary
    );
    Ok(())
}
