//! Background Sweep Task
//!
//! Periodically sweeps the pattern cache so stale entries are reclaimed even
//! when no match requests arrive.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::PatternCache;
use crate::config::CacheConfig;

/// Spawns a background task that sweeps `cache` every `interval`.
///
/// The sweep itself is synchronous and only holds the cache lock briefly, so
/// it runs directly on the runtime.
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(PatternCache::default());
/// let handle = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task(cache: Arc<PatternCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting pattern cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep();
            if removed == 0 {
                debug!("Background sweep: nothing to remove");
            }
        }
    })
}

/// Spawns the sweep task when `config` enables one.
///
/// Returns None when `sweep_interval_ms` is 0.
pub fn spawn_configured_sweep_task(
    cache: Arc<PatternCache>,
    config: &CacheConfig,
) -> Option<JoinHandle<()>> {
    config
        .sweep_interval()
        .map(|interval| spawn_sweep_task(cache, interval))
}
