//! Match Service
//!
//! Public entry point: validates inputs, fetches the compiled pattern from the
//! cache, sweeps the cache, and runs a full-string match.

use std::sync::Arc;

use crate::cache::PatternCache;
use crate::config::CacheConfig;
use crate::error::{MatchError, Result};

/// Matches text against regular expressions, reusing compiled patterns.
///
/// Cloning a Matcher is cheap and the clones share the same cache.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    cache: Arc<PatternCache>,
}

impl Matcher {
    /// Creates a Matcher backed by the given cache.
    pub fn new(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }

    /// Creates a Matcher with its own cache built from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Arc::new(PatternCache::from_config(config)))
    }

    /// The cache this Matcher reads from and sweeps.
    pub fn cache(&self) -> &Arc<PatternCache> {
        &self.cache
    }

    /// Checks whether `text` matches `pattern` in its entirety.
    ///
    /// Every successful lookup is followed by a cache sweep.
    ///
    /// # Errors
    ///
    /// - `MatchError::InvalidInput` if either argument is `None`
    /// - `MatchError::PatternSyntax` if `pattern` is not a valid regex
    ///
    /// # Example
    /// ```
    /// use pattern_cache::Matcher;
    ///
    /// let matcher = Matcher::default();
    /// assert!(matcher.matches(Some(r"\d+"), Some("123")).unwrap());
    /// assert!(!matcher.matches(Some(r"\d+"), Some("abc")).unwrap());
    /// ```
    pub fn matches(&self, pattern: Option<&str>, text: Option<&str>) -> Result<bool> {
        let (Some(pattern), Some(text)) = (pattern, text) else {
            return Err(MatchError::null_input());
        };

        let compiled = self.cache.get_or_compile(pattern)?;
        self.cache.sweep();

        Ok(compiled.is_full_match(text))
    }
}
