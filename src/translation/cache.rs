/*!
 * Translation caching functionality.
 *
 * This module provides a bounded least-recently-used cache of resolved
 * translations keyed by (lower-cased word, source language), so repeated
 * lookups never reach the network twice within a session.
 */

use log::debug;
use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::resolver::TranslationResult;

/// Default number of cached translations
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Cache key combining the lower-cased word and its source language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    word: String,
    source_language: String,
}

impl CacheKey {
    pub fn new(word: &str, source_language: &str) -> Self {
        Self {
            word: word.trim().to_lowercase(),
            source_language: source_language.trim().to_lowercase(),
        }
    }
}

/// Hit/miss counters and occupancy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub hit_rate: f64,
    pub len: usize,
    pub capacity: usize,
}

/// Bounded translation cache, shared between clones
#[derive(Clone)]
pub struct TranslationCache {
    entries: Arc<Mutex<LruCache<CacheKey, TranslationResult>>>,
    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
}

impl TranslationCache {
    /// Create a cache holding at most `capacity` entries (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get a translation, marking it as recently used
    pub fn get(&self, word: &str, source_language: &str) -> Option<TranslationResult> {
        let key = CacheKey::new(word, source_language);
        let found = self.entries.lock().get(&key).cloned();

        match found {
            Some(result) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for '{}' ({})", key.word, key.source_language);
                Some(result)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for '{}' ({})", key.word, key.source_language);
                None
            }
        }
    }

    /// Store a translation, evicting the least recently used entry when full
    pub fn store(&self, word: &str, source_language: &str, result: TranslationResult) {
        let key = CacheKey::new(word, source_language);
        if let Some((evicted, _)) = self.entries.lock().push(key, result) {
            debug!("Evicted '{}' ({}) from cache", evicted.word, evicted.source_language);
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let entries = self.entries.lock();

        CacheStats {
            hits,
            misses,
            hit_rate: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
            len: entries.len(),
            capacity: entries.cap().get(),
        }
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!("Translation cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
