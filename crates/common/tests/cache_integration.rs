//! Integration tests for cache module
//!
//! Tests per-entry TTL behaviour and concurrent access patterns.

#![cfg(feature = "runtime")]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use paybridge_common::cache::Cache;
use paybridge_common::time::MockClock;

/// Verifies a token-shaped workload: entries with different lifetimes expire
/// independently as the clock advances.
///
/// # Test Steps
/// 1. Insert two tokens with 6700s and 100s TTLs
/// 2. Advance 101s and confirm only the short-lived one is gone
/// 3. Advance to 6700s and confirm the long-lived one is gone too
#[test]
fn test_tokens_expire_independently() {
    let clock = MockClock::new();
    let cache: Cache<String, String, MockClock> = Cache::with_clock(clock.clone());

    cache.insert_with_ttl("app-a".to_string(), "token-a".to_string(), Duration::from_secs(6700));
    cache.insert_with_ttl("app-b".to_string(), "token-b".to_string(), Duration::from_secs(100));

    clock.advance_secs(101);
    assert_eq!(cache.get(&"app-a".to_string()), Some("token-a".to_string()));
    assert_eq!(cache.get(&"app-b".to_string()), None);

    clock.advance_secs(6599);
    assert_eq!(cache.get(&"app-a".to_string()), None);
}

/// Verifies purging drops only expired entries and reports the count.
#[test]
fn test_cleanup_purges_only_expired() {
    let clock = MockClock::new();
    let cache: Cache<&'static str, i32, MockClock> = Cache::with_clock(clock.clone());

    cache.insert_with_ttl("a", 1, Duration::from_secs(30));
    cache.insert_with_ttl("b", 2, Duration::from_secs(30));
    cache.insert_with_ttl("c", 3, Duration::from_secs(90));

    clock.advance_secs(30);
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.cleanup_expired(), 2);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.remove(&"c"), Some(3));
}

/// Validates concurrent writers and readers across threads.
///
/// # Test Steps
/// 1. Spawn 8 threads each inserting and reading back 50 keys
/// 2. Verify the final size and that every read saw its own write
#[test]
fn test_concurrent_access() {
    let cache = Arc::new(Cache::<String, usize>::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..50 {
                    let key = format!("{t}-{i}");
                    cache.insert_with_ttl(key.clone(), i, Duration::from_secs(60));
                    assert_eq!(cache.get(&key), Some(i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 400);
}
