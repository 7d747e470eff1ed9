//! Cache Store Module
//!
//! Concurrent map from pattern text to compiled pattern, with capacity and
//! staleness eviction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats, MAX_CACHE_AGE_MS, MAX_CACHE_SIZE};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::pattern::CompiledPattern;

// == Pattern Cache ==
/// Thread-safe cache of compiled patterns keyed by pattern text.
///
/// Lookups take a read lock; inserts and sweeps that remove entries take the
/// write lock. Compilation happens outside the lock, so the size bound is
/// only guaranteed after [`PatternCache::sweep`] runs: concurrent inserters
/// can push the store past `max_size` until the next sweep.
#[derive(Debug)]
pub struct PatternCache {
    /// Pattern text to entry
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Maximum number of entries kept after a sweep
    max_size: usize,
    /// Staleness threshold in milliseconds
    max_age_ms: u64,
    /// Reference point for entry timestamps
    epoch: Instant,
    /// Source of access sequence numbers
    next_seq: AtomicU64,
    /// Performance statistics
    stats: StatsCounters,
}

impl PatternCache {
    // == Constructor ==
    /// Creates a new PatternCache.
    ///
    /// # Arguments
    /// * `max_size` - Number of entries kept after a sweep
    /// * `max_age` - Entries untouched for longer than this are swept
    pub fn new(max_size: usize, max_age: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_size,
            max_age_ms: u64::try_from(max_age.as_millis()).unwrap_or(u64::MAX),
            epoch: Instant::now(),
            next_seq: AtomicU64::new(0),
            stats: StatsCounters::default(),
        }
    }

    /// Creates a PatternCache sized by the given configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_size, config.max_age())
    }

    // == Get Or Compile ==
    /// Returns the compiled pattern for `pattern`, compiling and caching it on
    /// a miss. Either way the entry's access time is refreshed.
    ///
    /// Two threads missing on the same text at once may both compile; only the
    /// first insert is kept and both receive that entry's pattern.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::PatternSyntax` if the pattern is invalid. Nothing
    /// is inserted in that case.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<CompiledPattern>> {
        self.get_or_compile_at(pattern, self.now_ms())
    }

    pub(crate) fn get_or_compile_at(
        &self,
        pattern: &str,
        now_ms: u64,
    ) -> Result<Arc<CompiledPattern>> {
        if let Some(found) = self.lookup(pattern, now_ms) {
            self.stats.record_hit();
            return Ok(found);
        }

        self.stats.record_miss();
        debug!(pattern, "Compiling pattern on cache miss");
        let compiled = Arc::new(CompiledPattern::compile(pattern)?);

        let mut entries = self.write();
        if let Some(entry) = entries.get(pattern) {
            debug!(pattern, "Pattern inserted concurrently, discarding duplicate compile");
            entry.touch(now_ms, self.bump_seq());
            return Ok(entry.pattern());
        }
        entries.insert(
            pattern.to_string(),
            CacheEntry::new(Arc::clone(&compiled), now_ms, self.bump_seq()),
        );

        Ok(compiled)
    }

    fn lookup(&self, pattern: &str, now_ms: u64) -> Option<Arc<CompiledPattern>> {
        let entries = self.read();
        entries.get(pattern).map(|entry| {
            entry.touch(now_ms, self.bump_seq());
            entry.pattern()
        })
    }

    // == Sweep ==
    /// Removes stale entries, then evicts least recently used entries until
    /// the store is within `max_size`.
    ///
    /// Staleness is checked on every sweep regardless of size. When nothing
    /// needs removing only the read lock is taken.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(self.now_ms())
    }

    pub(crate) fn sweep_at(&self, now_ms: u64) -> usize {
        {
            let entries = self.read();
            let oversized = entries.len() > self.max_size;
            if !oversized
                && !entries
                    .values()
                    .any(|entry| entry.is_stale(now_ms, self.max_age_ms))
            {
                return 0;
            }
        }

        let mut entries = self.write();

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_stale(now_ms, self.max_age_ms));
        let expired = before - entries.len();

        let evicted = entries.len().saturating_sub(self.max_size);
        if evicted > 0 {
            let mut by_access: Vec<(u64, String)> = entries
                .iter()
                .map(|(key, entry)| (entry.access_seq(), key.clone()))
                .collect();
            by_access.sort_unstable();
            for (_, key) in by_access.into_iter().take(evicted) {
                entries.remove(&key);
            }
        }
        let remaining = entries.len();
        drop(entries);

        self.stats.record_expirations(expired);
        self.stats.record_evictions(evicted);
        if expired + evicted > 0 {
            info!(expired, evicted, remaining, "Pattern cache sweep removed entries");
        }

        expired + evicted
    }

    // == Remove ==
    /// Removes the entry for `pattern`. Returns true if one was present.
    pub fn remove(&self, pattern: &str) -> bool {
        self.write().remove(pattern).is_some()
    }

    // == Clear ==
    /// Removes every entry. Statistics are kept.
    pub fn clear(&self) {
        self.write().clear();
    }

    // == Contains ==
    /// Checks whether `pattern` is cached, without refreshing its access time.
    pub fn contains(&self, pattern: &str) -> bool {
        self.read().contains_key(pattern)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns the number of entries kept after a sweep.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the age after which an untouched entry is swept.
    pub fn max_age(&self) -> Duration {
        Duration::from_millis(self.max_age_ms)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn bump_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    // The map stays consistent across a panic in any holder, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(MAX_CACHE_SIZE, Duration::from_millis(MAX_CACHE_AGE_MS))
    }
}
