//! Sync command implementation
//!
//! Brings one checkout to an exact revision of a repository: clone if
//! needed, fetch if the revision is unknown, then a guarded hard reset and
//! clean.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use gut_build::folders::Layout;
use gut_build::mirror::{FetchPolicy, MirrorSynchronizer, MirrorTarget};

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Local checkout path
    #[arg(short, long, value_name = "PATH")]
    pub path: PathBuf,

    /// Repository URL; the checkout's remotes must mention it
    #[arg(
        short,
        long,
        value_name = "URL",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub url: String,

    /// Tag, commit or branch to check out
    #[arg(short, long, value_name = "REV")]
    pub revision: String,

    /// Workspace root whose directories are created before syncing
    /// (defaults to the checkout's parent directory)
    #[arg(long, value_name = "PATH", env = "GUT_BUILD_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Fetch even if the revision is already known locally
    #[arg(long)]
    pub always_fetch: bool,
}

/// Execute the sync command
pub fn execute(args: SyncArgs) -> Result<()> {
    let workspace = match args.workspace {
        Some(workspace) => workspace,
        None => args
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let fetch_policy = if args.always_fetch {
        FetchPolicy::Always
    } else {
        FetchPolicy::IfMissing
    };

    let target = MirrorTarget::new(&args.url, &args.revision, &args.path);
    let sync = MirrorSynchronizer::new(Layout::new(workspace)).fetch_policy(fetch_policy);
    sync.sync(&target)
        .with_context(|| format!("Failed to sync {}", args.path.display()))?;

    println!("✅ {} is at {}", args.path.display(), args.revision);
    Ok(())
}
