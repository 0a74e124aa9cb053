use super::checker::CompatibilityChecker;
use super::result::CompatibilityResult;
use crate::config::RunConfiguration;
use ahash::{AHashMap, RandomState};
use itertools::Itertools;
use rayon::prelude::*;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::{PoisonError, RwLock};

struct CacheEntry {
    fingerprint: u64,
    result: CompatibilityResult,
}

#[derive(Default)]
struct Entries {
    /// Bumped by every invalidation. A result computed under an older
    /// generation is returned but never stored.
    generation: u64,
    map: AHashMap<String, CacheEntry>,
}

/// Memoizes compatibility results per run configuration id.
///
/// Each entry remembers a fingerprint of the plugin id and user configuration
/// it was computed from, so an edited configuration never hits a stale entry
/// even if the caller forgets to invalidate. Changes to the installed plugin
/// set are invisible to the fingerprint: call [`invalidate_all`] after them.
///
/// [`invalidate_all`]: CompatibilityCache::invalidate_all
pub struct CompatibilityCache {
    entries: RwLock<Entries>,
    hasher: RandomState,
}

impl Default for CompatibilityCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatibilityCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            hasher: RandomState::new(),
        }
    }

    /// Returns the cached result for `run`, computing and storing it on a miss.
    ///
    /// A result computed while an invalidation happens is not stored, so a
    /// check against the old plugin set cannot outlive [`invalidate_all`].
    ///
    /// [`invalidate_all`]: CompatibilityCache::invalidate_all
    pub fn get(&self, run: &RunConfiguration, checker: &CompatibilityChecker) -> CompatibilityResult {
        let fingerprint = self.fingerprint(run);

        let generation = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.map.get(&run.id) {
                if entry.fingerprint == fingerprint {
                    log::debug!("Compatibility cache hit for '{}'", run.id);
                    return entry.result.clone();
                }
            }
            entries.generation
        };

        log::debug!("Compatibility cache miss for '{}'", run.id);
        let result = checker.check(run);
        self.store(
            &run.id,
            CacheEntry {
                fingerprint,
                result: result.clone(),
            },
            generation,
        );
        result
    }

    /// Resolves many configurations in parallel, preserving input order.
    pub fn get_all(
        &self,
        runs: &[RunConfiguration],
        checker: &CompatibilityChecker,
    ) -> Vec<CompatibilityResult> {
        runs.par_iter().map(|run| self.get(run, checker)).collect()
    }

    /// Drops every entry. Call when plugins are installed, updated or removed,
    /// or when run configurations are edited.
    pub fn invalidate_all(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        log::info!("Invalidating {} cached compatibility results", entries.map.len());
        entries.map.clear();
        entries.generation += 1;
    }

    pub fn invalidate(&self, run_id: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.map.remove(run_id);
        entries.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn generation(&self) -> u64 {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    fn store(&self, run_id: &str, entry: CacheEntry, generation: u64) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.generation != generation {
            log::debug!("Discarding result for '{}' computed before invalidation", run_id);
            return;
        }
        entries.map.insert(run_id.to_string(), entry);
    }

    fn fingerprint(&self, run: &RunConfiguration) -> u64 {
        let mut hasher = self.hasher.build_hasher();
        run.plugin_id.hash(&mut hasher);
        // serde_json objects are key-sorted, so nested values print canonically.
        for (key, value) in run.user_config.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            key.hash(&mut hasher);
            value.to_string().hash(&mut hasher);
        }
        hasher.finish()
    }
}
