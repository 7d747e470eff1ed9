//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::{MAX_CACHE_AGE_MS, MAX_CACHE_SIZE};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of compiled patterns kept after a sweep
    pub max_size: usize,
    /// Age in milliseconds after which an untouched entry is stale
    pub max_age_ms: u64,
    /// Background sweep interval in milliseconds, 0 = no background task
    pub sweep_interval_ms: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PATTERN_CACHE_MAX_SIZE` - Maximum cached patterns (default: 100)
    /// - `PATTERN_CACHE_MAX_AGE_MS` - Staleness threshold in ms (default: 60000)
    /// - `PATTERN_CACHE_SWEEP_INTERVAL_MS` - Background sweep interval in ms (default: 0)
    pub fn from_env() -> Self {
        Self {
            max_size: env_or("PATTERN_CACHE_MAX_SIZE", MAX_CACHE_SIZE),
            max_age_ms: env_or("PATTERN_CACHE_MAX_AGE_MS", MAX_CACHE_AGE_MS),
            sweep_interval_ms: env_or("PATTERN_CACHE_SWEEP_INTERVAL_MS", 0),
        }
    }

    /// Staleness threshold as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_millis(self.max_age_ms)
    }

    /// Background sweep interval, or None when the task is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_ms > 0).then(|| Duration::from_millis(self.sweep_interval_ms))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: MAX_CACHE_SIZE,
            max_age_ms: MAX_CACHE_AGE_MS,
            sweep_interval_ms: 0,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
