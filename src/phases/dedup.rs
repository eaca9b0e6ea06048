//! Phase 2: Resolving Duplicate Colors
//!
//! This is the core of the build. Several repositories may define a color with
//! the same name; exactly one of them may ship it. This phase decides, for
//! every color name, which repository owns it.
//!
//! ## Process
//!
//! 1.  **Single Pass**: Trees are visited in catalog order, and every color of
//!     a tree is claimed independently.
//!
//! 2.  **Ownership Ordering**: When a color is already owned by another
//!     repository, [`preferred`] decides whether the newcomer displaces the
//!     owner. Losing one color does not affect the newcomer's other claims.
//!
//! 3.  **Derived Winners**: The [`Assignment`] is the only state. The set of
//!     winning repositories is computed from it on demand, so a repository
//!     that loses its last color is never reported as a winner.
//!
//! Every contention is logged as a "duplicate color detected" event naming
//! both repositories.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use log::info;

use crate::catalog::RepositoryRecord;
use crate::repository::WorkingTree;

/// Does `incoming` strictly displace the current `owner` of a color?
///
/// Keys are compared in order, each only when the previous one is equal:
///
/// 1. `priority`, higher wins
/// 2. `stars`, higher wins
/// 3. `last_update`, more recent wins. A repository without a timestamp is
///    assumed to be a curated plugin and beats one that has a timestamp; when
///    both lack one, the incoming repository wins.
///
/// Equal present timestamps keep the current owner.
pub fn preferred(incoming: &RepositoryRecord, owner: &RepositoryRecord) -> bool {
    match incoming.priority.cmp(&owner.priority) {
        Ordering::Greater => return true,
        Ordering::Less => return false,
        Ordering::Equal => {}
    }
    match incoming.stars.cmp(&owner.stars) {
        Ordering::Greater => return true,
        Ordering::Less => return false,
        Ordering::Equal => {}
    }
    match (&incoming.last_update, &owner.last_update) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(incoming_ts), Some(owner_ts)) => incoming_ts > owner_ts,
    }
}

/// Outcome of one claim on a color
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// The color had no owner
    New,
    /// The claimant already owns the color
    AlreadyOwned,
    /// The claimant displaced the previous owner
    Replaced { previous: RepositoryRecord },
    /// The current owner keeps the color
    Rejected { owner: RepositoryRecord },
}

/// Mapping from color name to the repository owning it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    owners: BTreeMap<String, RepositoryRecord>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `color` for `record`, applying the ownership ordering.
    pub fn claim(&mut self, color: &str, record: &RepositoryRecord) -> Claim {
        let mut slot = match self.owners.entry(color.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                return Claim::New;
            }
            Entry::Occupied(slot) => slot,
        };

        let owner = slot.get();
        if owner == record {
            return Claim::AlreadyOwned;
        }

        info!(
            "duplicate color detected: '{}' on new repo {} and old repo {}",
            color, record, owner
        );

        if preferred(record, owner) {
            info!("replace old repo {} with new repo {}", owner.url, record.url);
            Claim::Replaced {
                previous: slot.insert(record.clone()),
            }
        } else {
            Claim::Rejected {
                owner: owner.clone(),
            }
        }
    }

    /// Current owner of `color`
    pub fn owner(&self, color: &str) -> Option<&RepositoryRecord> {
        self.owners.get(color)
    }

    /// Colors in name order with their owners
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RepositoryRecord)> {
        self.owners.iter().map(|(color, repo)| (color.as_str(), repo))
    }

    /// Colors owned by the repository identified by `url`, in name order
    pub fn colors_of<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.owners
            .iter()
            .filter(move |(_, repo)| repo.url == url)
            .map(|(color, _)| color.as_str())
    }

    /// Distinct repositories owning at least one color, ordered by url
    pub fn winning_set(&self) -> WinningSet {
        let winners = self
            .owners
            .values()
            .map(|repo| (repo.url.clone(), repo.clone()))
            .collect();
        WinningSet { winners }
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Repositories owning at least one color, derived from an [`Assignment`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinningSet {
    winners: BTreeMap<String, RepositoryRecord>,
}

impl WinningSet {
    pub fn contains(&self, url: &str) -> bool {
        self.winners.contains_key(url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepositoryRecord> {
        self.winners.values()
    }

    pub fn urls(&self) -> BTreeSet<&str> {
        self.winners.keys().map(|url| url.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.winners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }
}

/// Execute Phase 2: resolve color ownership across all trees
///
/// Trees must be supplied in a fixed order (catalog order). The result only
/// depends on that order when two contenders tie on priority and stars and
/// both lack a timestamp.
pub fn resolve<'a, I>(trees: I) -> Assignment
where
    I: IntoIterator<Item = &'a WorkingTree>,
{
    let mut assignment = Assignment::new();
    for tree in trees {
        for color in &tree.colors {
            assignment.claim(color, &tree.record);
        }
    }
    assignment
}
