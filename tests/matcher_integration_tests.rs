//! Integration Tests for the Match Service
//!
//! Exercises the public API end to end, including concurrent callers.

use std::sync::{Arc, Barrier};
use std::thread::{self, sleep};
use std::time::Duration;

use pattern_cache::{CacheConfig, MatchError, Matcher, PatternCache, MAX_CACHE_SIZE};

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn short_lived_matcher(max_size: usize, max_age_ms: u64) -> Matcher {
    Matcher::from_config(&CacheConfig {
        max_size,
        max_age_ms,
        sweep_interval_ms: 0,
    })
}

// == Match Semantics ==

#[test]
fn test_digits_scenario() {
    let matcher = Matcher::default();

    assert!(matcher.matches(Some(r"\d+"), Some("123")).unwrap());
    assert!(!matcher.matches(Some(r"\d+"), Some("abc")).unwrap());
    assert!(matches!(
        matcher.matches(None, Some("123")),
        Err(MatchError::InvalidInput(_))
    ));
    assert!(matches!(
        matcher.matches(Some(r"\d+"), None),
        Err(MatchError::InvalidInput(_))
    ));
}

#[test]
fn test_invalid_input_message() {
    let matcher = Matcher::default();
    let err = matcher.matches(None, None).unwrap_err();
    assert_eq!(err.to_string(), "Invalid input: Regex or text cannot be null");
}

#[test]
fn test_full_string_semantics() {
    let matcher = Matcher::default();
    let cases = [
        ("a|ab", "ab", true),
        ("[a-z]+@[a-z]+", "me@host", true),
        ("[a-z]+@[a-z]+", "to me@host", false),
        ("colou?r", "colour", true),
        ("colou?r", "colours", false),
        (".*", "", true),
    ];
    for (pattern, text, expected) in cases {
        assert_eq!(
            matcher.matches(Some(pattern), Some(text)).unwrap(),
            expected,
            "{pattern:?} against {text:?}"
        );
    }
}

#[test]
fn test_invalid_pattern_surfaces_and_leaves_cache_unchanged() {
    let matcher = Matcher::default();
    matcher.matches(Some("ok"), Some("ok")).unwrap();

    for bad in ["[", "(", "a{2,1}", "a)|(b"] {
        let result = matcher.matches(Some(bad), Some("x"));
        assert!(
            matches!(result, Err(MatchError::PatternSyntax(_))),
            "{bad:?} should be rejected"
        );
    }

    assert_eq!(matcher.cache().len(), 1);
    assert!(matcher.cache().contains("ok"));
}

// == Cache Behaviour ==

#[test]
fn test_cache_bounded_after_overflow() {
    init_tracing();
    let matcher = Matcher::default();

    for i in 0..105 {
        matcher
            .matches(Some(&format!("pattern{i}")), Some(&format!("text{i}")))
            .unwrap();
    }

    assert!(matcher.cache().len() <= MAX_CACHE_SIZE);
    assert_eq!(matcher.cache().stats().evictions, 5);
}

#[test]
fn test_stale_entries_removed_by_next_call() {
    init_tracing();
    let matcher = short_lived_matcher(100, 100);

    for i in 0..10 {
        matcher.matches(Some(&format!("old{i}")), Some("x")).unwrap();
    }
    assert_eq!(matcher.cache().len(), 10);

    sleep(Duration::from_millis(250));

    // Well under capacity, yet the sweep after this call drops every stale entry.
    matcher.matches(Some("newPattern"), Some("newText")).unwrap();
    assert_eq!(matcher.cache().len(), 1);
    assert!(matcher.cache().contains("newPattern"));
    assert_eq!(matcher.cache().stats().expirations, 10);
}

#[test]
fn test_recently_used_pattern_survives_eviction() {
    let matcher = short_lived_matcher(3, 60_000);

    matcher.matches(Some("a"), Some("a")).unwrap();
    matcher.matches(Some("b"), Some("b")).unwrap();
    matcher.matches(Some("c"), Some("c")).unwrap();
    matcher.matches(Some("a"), Some("a")).unwrap();
    matcher.matches(Some("d"), Some("d")).unwrap();

    let cache = matcher.cache();
    assert!(cache.contains("a"));
    assert!(!cache.contains("b"));
    assert!(cache.contains("c"));
    assert!(cache.contains("d"));
}

#[test]
fn test_matchers_share_explicit_cache() {
    let cache = Arc::new(PatternCache::default());
    let first = Matcher::new(Arc::clone(&cache));
    let second = Matcher::new(Arc::clone(&cache));

    first.matches(Some(r"\d+"), Some("1")).unwrap();
    second.matches(Some(r"\d+"), Some("2")).unwrap();

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn test_same_compiled_pattern_is_reused() {
    let cache = PatternCache::default();
    let first = cache.get_or_compile(r"\w+").unwrap();
    let second = cache.get_or_compile(r"\w+").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

// == Concurrency ==

#[test]
fn test_concurrent_callers_same_pattern() {
    const THREADS: usize = 8;
    let matcher = Matcher::default();
    let barrier = Barrier::new(THREADS);

    let compiled: Vec<_> = thread::scope(|s| {
        let matcher = &matcher;
        let barrier = &barrier;
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(move || {
                    barrier.wait();
                    assert!(matcher.matches(Some(r"[0-9]{3}"), Some("123")).unwrap());
                    matcher.cache().get_or_compile(r"[0-9]{3}").unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Racing first uses may compile more than once, but only one entry is kept.
    assert_eq!(matcher.cache().len(), 1);
    for pattern in &compiled[1..] {
        assert!(Arc::ptr_eq(&compiled[0], pattern));
    }
}

#[test]
fn test_concurrent_callers_distinct_patterns() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 50;
    const MAX_SIZE: usize = 20;

    let matcher = short_lived_matcher(MAX_SIZE, 60_000);
    let barrier = Barrier::new(THREADS);

    thread::scope(|s| {
        for t in 0..THREADS {
            let matcher = &matcher;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    let pattern = format!("t{t}p{i}[a-z]*");
                    let text = format!("t{t}p{i}xyz");
                    assert!(matcher.matches(Some(&pattern), Some(&text)).unwrap());

                    // Inserts land before their sweep, so the bound is soft by
                    // at most one entry per concurrent inserter.
                    assert!(matcher.cache().len() <= MAX_SIZE + THREADS);
                }
            });
        }
    });

    matcher.cache().sweep();
    assert!(matcher.cache().len() <= MAX_SIZE);

    let stats = matcher.cache().stats();
    assert_eq!(stats.misses as usize, THREADS * PER_THREAD);
    assert_eq!(stats.misses as usize, stats.evictions as usize + matcher.cache().len());
}
