//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Colorswitch Build - Aggregate colorscheme repositories into one distribution
#[derive(Parser, Debug)]
#[command(name = "colorswitch-build")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (off, error, warn, info, debug, trace); RUST_LOG takes precedence.
    ///
    /// Defaults to `info`, or `warn` with `--quiet` and `debug` with `--verbose`.
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the distribution: fetch, deduplicate, merge and write manifests
    Build(commands::build::BuildArgs),

    /// List every color with the repository that owns it
    Ls(commands::ls::LsArgs),

    /// Remove merged folders and manifests from the distribution
    Clean(commands::clean::CleanArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Build(args) => commands::build::execute(args),
            Commands::Ls(args) => commands::ls::execute(args),
            Commands::Clean(args) => commands::clean::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }

    /// Level used when `RUST_LOG` is not set
    fn log_level(&self) -> &str {
        if let Some(level) = &self.log_level {
            return level;
        }
        let (quiet, verbose) = match &self.command {
            Commands::Build(args) => (args.quiet, args.verbose),
            Commands::Clean(args) => (args.quiet, false),
            Commands::Ls(_) | Commands::Completions(_) => (false, false),
        };
        if quiet {
            "warn"
        } else if verbose {
            "debug"
        } else {
            "info"
        }
    }

    fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(self.log_level());
        // A logger may already be installed when embedded in tests
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_target(false)
            .try_init();
    }
}
