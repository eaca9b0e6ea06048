//! # Colorswitch Build CLI
//!
//! This is the binary entry point for the `colorswitch-build` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initializing logging from `--log-level` / `RUST_LOG`.
//! - Executing the appropriate command and reporting top-level errors.
//!
//! The build logic lives in the `colorswitch_build` library crate; the binary
//! is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
