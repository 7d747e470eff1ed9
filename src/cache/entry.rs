//! Cache Entry Module
//!
//! Defines a single cached compiled pattern with its access metadata.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::pattern::CompiledPattern;

// == Cache Entry ==
/// A compiled pattern plus the time and order of its last use.
///
/// Access metadata is atomic so that hits can refresh it while the store is
/// only read-locked.
#[derive(Debug)]
pub struct CacheEntry {
    /// The compiled pattern, shared with callers
    pattern: Arc<CompiledPattern>,
    /// Last access, in milliseconds since the owning store was created
    last_access_ms: AtomicU64,
    /// Store-wide access sequence number of the last access
    access_seq: AtomicU64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry, accessed at `now_ms` with sequence number `seq`.
    pub fn new(pattern: Arc<CompiledPattern>, now_ms: u64, seq: u64) -> Self {
        Self {
            pattern,
            last_access_ms: AtomicU64::new(now_ms),
            access_seq: AtomicU64::new(seq),
        }
    }

    // == Touch ==
    /// Records an access at `now_ms` with sequence number `seq`.
    ///
    /// Concurrent touches may race; the larger timestamp and sequence win.
    pub fn touch(&self, now_ms: u64, seq: u64) {
        self.last_access_ms.fetch_max(now_ms, Ordering::Relaxed);
        self.access_seq.fetch_max(seq, Ordering::Relaxed);
    }

    /// Returns a shared handle to the compiled pattern.
    pub fn pattern(&self) -> Arc<CompiledPattern> {
        Arc::clone(&self.pattern)
    }

    /// Last access, in milliseconds since the owning store was created.
    pub fn last_access_ms(&self) -> u64 {
        self.last_access_ms.load(Ordering::Relaxed)
    }

    /// Sequence number of the last access; lower means less recently used.
    pub fn access_seq(&self) -> u64 {
        self.access_seq.load(Ordering::Relaxed)
    }

    // == Is Stale ==
    /// Checks whether the entry has gone untouched for longer than `max_age_ms`.
    ///
    /// Boundary condition: an entry exactly `max_age_ms` old is still fresh.
    pub fn is_stale(&self, now_ms: u64, max_age_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_access_ms()) > max_age_ms
    }
}
