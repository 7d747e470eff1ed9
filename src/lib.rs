//! Pattern Cache - A thread-safe cache of compiled regular expressions
//!
//! Avoids recompiling the same pattern text on every match request, with
//! bounded size and time-based staleness eviction.

pub mod cache;
pub mod config;
pub mod error;
pub mod matcher;
pub mod pattern;
pub mod tasks;

pub use cache::{CacheStats, PatternCache, MAX_CACHE_AGE_MS, MAX_CACHE_SIZE};
pub use config::CacheConfig;
pub use error::{MatchError, Result};
pub use matcher::Matcher;
pub use pattern::CompiledPattern;
pub use tasks::{spawn_configured_sweep_task, spawn_sweep_task};
