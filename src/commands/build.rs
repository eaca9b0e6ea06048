//! Build command implementation
//!
//! The build command executes the full pipeline:
//! 1. Fetching every catalog repository
//! 2. Resolving duplicate colors
//! 3. Merging the winners into the distribution root
//! 4. Running the submodule sync command
//! 5. Writing the manifests

use anyhow::Result;
use clap::Args;
use std::time::Instant;

use colorswitch_build::catalog::FileCatalog;
use colorswitch_build::config::FetchFailurePolicy;
use colorswitch_build::phases::{orchestrator, SyncOutcome};
use colorswitch_build::repository::WorkingTreeProvider;

use super::ConfigArgs;

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Remove every cloned repository first and clone again
    #[arg(long)]
    pub full_rebuild: bool,

    /// Do not run the submodule sync command
    #[arg(long)]
    pub skip_sync: bool,

    /// Leave repositories that cannot be fetched out instead of failing
    #[arg(long)]
    pub skip_failed: bool,

    /// Show detailed progress information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the build command
pub fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    let mut config = args.config.load()?;
    if args.skip_sync {
        config.sync_command.clear();
    }
    if args.skip_failed {
        config.fetch_failure = FetchFailurePolicy::Skip;
    }

    if !config.catalog.exists() {
        anyhow::bail!("Catalog file not found: {}", config.catalog.display());
    }

    if !args.quiet {
        println!("🎨 Colorswitch Build");
        println!();
    }
    if !args.quiet && args.verbose {
        println!("📋 Catalog: {}", config.catalog.display());
        println!("📦 Submodules: {}", config.submodule_root.display());
        println!("📂 Distribution: {}", config.distribution_root.display());
    }

    let catalog = FileCatalog::new(&config.catalog);
    let provider = WorkingTreeProvider::new(config.submodule_root.clone())
        .color_extensions(config.color_extensions.clone())
        .clone_attempts(config.clone_attempts);

    if args.full_rebuild {
        provider.wipe()?;
    }

    let report = match orchestrator::execute_build(&config, &catalog, &provider) {
        Ok(report) => report,
        Err(e) => {
            if !args.quiet {
                println!("❌ Build failed");
                println!();
            }
            return Err(e.into());
        }
    };

    if !args.quiet {
        let duration = start_time.elapsed();
        println!("✅ Built successfully in {:.2}s", duration.as_secs_f64());
        println!(
            "   {} colors from {} of {} repositories",
            report.colors,
            report.winners.len(),
            report.repositories
        );
        println!("   {} files merged", report.files_copied);
        if !report.skipped.is_empty() {
            println!("   ⚠️  Skipped: {}", report.skipped.join(", "));
        }
        if let SyncOutcome::Failed(reason) = &report.sync {
            println!("   ⚠️  Submodule sync failed: {}", reason);
        }
        println!("   Manifests: {}", report.manifests.submodules.display());
        println!("              {}", report.manifests.candidates.display());

        if args.verbose {
            println!();
            for winner in &report.winners {
                println!("   • {}", winner);
            }
        }
    }

    Ok(())
}
