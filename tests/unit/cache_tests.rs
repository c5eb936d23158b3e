/*!
 * Tests for the bounded translation cache
 */

use songlingo::translation::{TranslationCache, TranslationResult};

fn result(word: &str, text: &str) -> TranslationResult {
    let mut result = TranslationResult::untranslated(word);
    result.text = text.to_string();
    result
}

#[test]
fn test_cache_withKeyInDifferentCase_shouldHit() {
    let cache = TranslationCache::new(8);
    cache.store("Amor", "ES", result("Amor", "love"));

    let hit = cache.get("amor", "es").expect("entry should be found");
    assert_eq!(hit.text, "love");
    assert!(cache.get("amor", "pt").is_none());
}

#[test]
fn test_cache_whenFull_shouldEvictLeastRecentlyUsed() {
    let cache = TranslationCache::new(2);
    cache.store("uno", "es", result("uno", "one"));
    cache.store("dos", "es", result("dos", "two"));

    // Touch "uno" so "dos" becomes the oldest entry
    assert!(cache.get("uno", "es").is_some());
    cache.store("tres", "es", result("tres", "three"));

    assert_eq!(cache.len(), 2);
    assert!(cache.get("dos", "es").is_none());
    assert!(cache.get("uno", "es").is_some());
    assert!(cache.get("tres", "es").is_some());
}

#[test]
fn test_cache_stats_shouldTrackHitsAndMisses() {
    let cache = TranslationCache::new(4);
    cache.store("sol", "es", result("sol", "sun"));

    cache.get("sol", "es");
    cache.get("luna", "es");
    cache.get("sol", "es");

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.len, 1);
    assert_eq!(stats.capacity, 4);
}

#[test]
fn test_cache_clear_shouldResetEntriesAndCounters() {
    let cache = TranslationCache::new(4);
    cache.store("sol", "es", result("sol", "sun"));
    cache.get("sol", "es");

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.stats().hits, 0);
}

#[test]
fn test_cache_withZeroCapacity_shouldStillHoldOneEntry() {
    let cache = TranslationCache::new(0);
    cache.store("mar", "es", result("mar", "sea"));
    assert_eq!(cache.stats().capacity, 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_clones_shouldShareEntries() {
    let cache = TranslationCache::new(4);
    let clone = cache.clone();
    clone.store("cielo", "es", result("cielo", "sky"));
    assert!(cache.get("cielo", "es").is_some());
}
