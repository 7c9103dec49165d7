//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// gut-build - Mirror the git sources and rebrand them as gut
#[derive(Parser, Debug)]
#[command(name = "gut-build")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone or update a checkout and reset it to an exact revision
    Sync(commands::sync::SyncArgs),

    /// Rewrite git to gut in a directory tree, in place
    Rewrite(commands::rewrite::RewriteArgs),

    /// Mirror and rewrite the sources for a platform
    Prepare(commands::prepare::PrepareArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args),
            Commands::Rewrite(args) => commands::rewrite::execute(args),
            Commands::Prepare(args) => commands::prepare::execute(args),
        }
    }
}

/// Configure `env_logger`; `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env)
        .format_target(false)
        .format_timestamp(None)
        .try_init();
}
