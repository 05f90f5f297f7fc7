//! Process-wide font-metrics memoization.
//!
//! A font family's metrics are computed at most once per process lifetime.
//! The key is the exact font-family string, not normalized: `"Georgia"` and
//! `"georgia"` probe separately, exactly as the upstream style system would
//! treat them as distinct values. Values are `Copy` and logically immutable
//! once stored. No eviction, no expiry; execution is single-threaded so the
//! lock is never contended.

use std::collections::HashMap;
use std::sync::Mutex;

use super::FontMetrics;

/// Global metrics store, created lazily on first insert.
static METRICS_CACHE: Mutex<Option<HashMap<String, FontMetrics>>> = Mutex::new(None);

/// Look up memoized metrics for a family.
///
/// # Panics
/// Panics if the global cache mutex is poisoned.
#[must_use]
pub fn cached(font_family: &str) -> Option<FontMetrics> {
    METRICS_CACHE
        .lock()
        .unwrap()
        .as_ref()
        .and_then(|cache| cache.get(font_family).copied())
}

/// Memoize metrics for a family.
///
/// # Panics
/// Panics if the global cache mutex is poisoned.
pub fn store(font_family: &str, metrics: FontMetrics) {
    let _ = METRICS_CACHE
        .lock()
        .unwrap()
        .get_or_insert_with(HashMap::new)
        .insert(font_family.to_string(), metrics);
}

/// Drop every memoized entry.
///
/// There is no reset in normal operation — the cache lives for the process —
/// but tests need isolation from one another's probes.
///
/// # Panics
/// Panics if the global cache mutex is poisoned.
pub fn clear_cache() {
    let mut guard = METRICS_CACHE.lock().unwrap();
    if let Some(cache) = guard.as_mut() {
        cache.clear();
    }
}
