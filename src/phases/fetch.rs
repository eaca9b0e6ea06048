//! Phase 1: Materializing Working Trees
//!
//! This is the first phase of the build. Every repository in the catalog is
//! materialized through the `WorkingTreeProvider`, strictly in catalog order,
//! so that the deduplication phase observes a reproducible arrival order.
//!
//! ## Failure Handling
//!
//! What happens when a tree cannot be materialized is an explicit choice made
//! through [`FetchFailurePolicy`]:
//!
//! - `Abort` propagates the first failure and stops the build.
//! - `Skip` logs a warning, records the repository as skipped, and leaves it
//!   out of color consideration.

use log::{info, warn};

use super::FetchOutcome;
use crate::catalog::RepositoryRecord;
use crate::config::FetchFailurePolicy;
use crate::error::Result;
use crate::repository::WorkingTreeProvider;

/// Execute Phase 1: materialize every record, in order
pub fn execute(
    records: &[RepositoryRecord],
    provider: &WorkingTreeProvider,
    policy: FetchFailurePolicy,
) -> Result<FetchOutcome> {
    let mut outcome = FetchOutcome::default();

    for record in records {
        match provider.materialize(record) {
            Ok(tree) => outcome.trees.push(tree),
            Err(e) => match policy {
                FetchFailurePolicy::Abort => return Err(e),
                FetchFailurePolicy::Skip => {
                    warn!("Skipping {}: {}", record.url, e);
                    outcome.skipped.push(record.url.clone());
                }
            },
        }
    }

    info!(
        "Materialized {} of {} repositories",
        outcome.trees.len(),
        records.len()
    );
    Ok(outcome)
}
