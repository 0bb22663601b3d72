use std::time::Duration;

use super::*;

#[test]
fn test_insert_then_get() {
    let cache = ResultCache::new(Duration::from_secs(60));
    assert!(cache.is_empty());
    cache.insert("a".to_string(), 1u32);
    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.get("b"), None);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_overwrite_replaces_value() {
    let cache = ResultCache::new(Duration::from_secs(60));
    cache.insert("k".to_string(), "old");
    cache.insert("k".to_string(), "new");
    assert_eq!(cache.get("k"), Some("new"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_expired_entry_is_evicted_on_lookup() {
    let cache = ResultCache::new(Duration::from_millis(20));
    cache.insert("k".to_string(), 5i32);
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("k"), None);
    assert!(cache.is_empty());
}

#[test]
fn test_ttl_accessor() {
    let cache: ResultCache<u8> = ResultCache::new(Duration::from_secs(60));
    assert_eq!(cache.ttl(), Duration::from_secs(60));
}
