//! Cache Module
//!
//! Provides a concurrent cache of compiled patterns with size and staleness eviction.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::PatternCache;

// == Public Constants ==
/// Default number of entries kept after a sweep
pub const MAX_CACHE_SIZE: usize = 100;

/// Default staleness threshold in milliseconds
pub const MAX_CACHE_AGE_MS: u64 = 60_000;
