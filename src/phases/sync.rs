//! Phase 4: Submodule Synchronization
//!
//! After merging, an external command (by default
//! `git submodule update --init --remote`) brings the distribution's
//! submodules up to date. Its exit status is always logged; whether a failure
//! stops the build is decided by [`SyncFailurePolicy`].

use std::path::Path;
use std::process::Command;

use log::{info, warn};

use super::SyncOutcome;
use crate::config::SyncFailurePolicy;
use crate::error::{Error, Result};

/// Execute Phase 4: run the sync command in `working_dir`
pub fn execute(
    command: &[String],
    working_dir: &Path,
    policy: SyncFailurePolicy,
) -> Result<SyncOutcome> {
    let Some((program, args)) = command.split_first() else {
        info!("No sync command configured, skipping submodule sync");
        return Ok(SyncOutcome::Skipped);
    };

    let rendered = command.join(" ");
    info!("{}", rendered);

    let failure = match Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .status()
    {
        Ok(status) if status.success() => {
            info!("'{}' finished: {}", rendered, status);
            return Ok(SyncOutcome::Succeeded);
        }
        Ok(status) => status.to_string(),
        Err(e) => format!("failed to start: {}", e),
    };

    match policy {
        SyncFailurePolicy::Warn => {
            warn!("'{}' {}, continuing", rendered, failure);
            Ok(SyncOutcome::Failed(failure))
        }
        SyncFailurePolicy::Abort => Err(Error::SyncCommand {
            command: rendered,
            message: failure,
        }),
    }
}
