//! Prepare command implementation
//!
//! Runs the full pipeline for one platform:
//! 1. Create the workspace directories
//! 2. Mirror the upstream sources at their pinned revisions
//! 3. Rewrite the source checkout from git to gut

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use gut_build::config::{self, Config};
use gut_build::defaults;
use gut_build::folders::Layout;
use gut_build::mirror::{FetchPolicy, MirrorSynchronizer};
use gut_build::prepare::{self, Platform};

/// Arguments for the prepare command
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Path to config file (defaults to ./gut-build.yaml when present)
    #[arg(short, long, value_name = "PATH", env = "GUT_BUILD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Workspace root (overrides the config file)
    #[arg(short, long, value_name = "PATH", env = "GUT_BUILD_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Platform to prepare sources for (unix or windows; defaults to the host)
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<Platform>,

    /// Fetch even if the pinned revisions are already known locally
    #[arg(long)]
    pub always_fetch: bool,
}

/// Load the config named on the command line, or the default file if it
/// exists, or fall back to built-in defaults.
fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let default = PathBuf::from(defaults::CONFIG_FILE);
            if default.exists() {
                config::from_file(&default)
                    .with_context(|| format!("Failed to load config {}", default.display()))
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Execute the prepare command
pub fn execute(args: PrepareArgs) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(args.config.as_ref())?;
    if let Some(workspace) = args.workspace {
        config.workspace = Some(workspace);
    }
    if args.always_fetch {
        config.fetch = FetchPolicy::Always;
    }
    let platform = args.platform.unwrap_or_else(Platform::current);

    let sync = MirrorSynchronizer::new(Layout::new(config.workspace())).fetch_policy(config.fetch);
    let report = prepare::prepare(&config, platform, &sync)
        .with_context(|| format!("Failed to prepare {} sources", platform))?;

    println!(
        "✅ Prepared {} sources in {:.2}s",
        platform,
        start_time.elapsed().as_secs_f64()
    );
    println!(
        "   {} files rewritten, {} entries renamed",
        report.rewritten, report.renamed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_execute_missing_config() {
        let args = PrepareArgs {
            config: Some(PathBuf::from("/nonexistent/gut-build.yaml")),
            workspace: None,
            platform: Some(Platform::Unix),
            always_fetch: false,
        };

        let result = execute(args);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to load config"));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gut-build.yaml");
        fs::write(&path, "fetch: always\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.fetch, FetchPolicy::Always);
    }
}
