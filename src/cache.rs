//! In-process caching of materialized working trees

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::repository::WorkingTree;

/// In-process cache of working trees keyed by repository url
///
/// A build visits every repository several times (fetch, deduplicate, merge,
/// emit); the cache makes every visit after the first one free.
#[derive(Debug, Clone, Default)]
pub struct TreeCache {
    cache: Arc<Mutex<HashMap<String, WorkingTree>>>,
}

impl TreeCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, WorkingTree>>> {
        self.cache.lock().map_err(|_| Error::LockPoisoned {
            context: "working tree cache".to_string(),
        })
    }

    /// Get a cached tree, or compute and cache it if not present
    pub fn get_or_process<F>(&self, url: &str, processor: F) -> Result<WorkingTree>
    where
        F: FnOnce() -> Result<WorkingTree>,
    {
        if let Some(cached) = self.lock()?.get(url) {
            return Ok(cached.clone());
        }

        // Not in cache, compute it outside the lock
        let result = processor()?;

        self.lock()?.insert(url.to_string(), result.clone());
        Ok(result)
    }

    /// Get a tree from cache without computing
    pub fn get(&self, url: &str) -> Result<Option<WorkingTree>> {
        Ok(self.lock()?.get(url).cloned())
    }

    /// Check if a url exists in cache
    pub fn contains(&self, url: &str) -> Result<bool> {
        Ok(self.lock()?.contains_key(url))
    }

    /// Clear all cached entries
    pub fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    /// Get the number of cached entries
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }
}
