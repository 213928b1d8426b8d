//! In-process [`KeyValueStore`] over the common TTL cache
//!
//! Suitable for tests and single-process deployments. Entries are lost on
//! restart and are not shared between processes.

use std::time::Duration;

use async_trait::async_trait;
use paybridge_common::{Cache, Clock, SystemClock};
use paybridge_core::KeyValueStore;
use paybridge_domain::Result;
use tracing::trace;

/// Memory-backed store; every entry expires on its own TTL.
#[derive(Clone)]
pub struct MemoryStore<C: Clock + Clone = SystemClock> {
    cache: Cache<String, String, C>,
}

impl MemoryStore<SystemClock> {
    #[must_use]
    pub fn new() -> Self {
        Self { cache: Cache::new() }
    }
}

impl Default for MemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> MemoryStore<C> {
    /// Store reading time from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self { cache: Cache::with_clock(clock) }
    }

    /// Live entries, after dropping expired ones.
    pub fn len(&self) -> usize {
        self.cache.cleanup_expired();
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<C> KeyValueStore for MemoryStore<C>
where
    C: Clock + Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(&key.to_string()))
    }

    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        trace!(key, ttl_secs = ttl.as_secs(), "Storing entry");
        self.cache.insert_with_ttl(key.to_string(), value, ttl);
        Ok(())
    }

    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(&key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.cache.remove(&key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use paybridge_common::MockClock;

    use super::*;

    #[tokio::test]
    async fn entries_expire_on_their_ttl() {
        let clock = MockClock::new();
        let store = MemoryStore::with_clock(clock.clone());

        store.set_with_ttl("k", "v".to_string(), Duration::from_secs(10)).await.unwrap();
        assert!(store.has("k").await.unwrap());

        clock.advance_secs(10);
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn zero_ttl_is_never_served() {
        let store = MemoryStore::new();
        store.set_with_ttl("k", "v".to_string(), Duration::ZERO).await.unwrap();
        assert!(!store.has("k").await.unwrap());
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let store = MemoryStore::new();
        store.set_with_ttl("k", "v".to_string(), Duration::from_secs(60)).await.unwrap();
        store.delete("k").await.unwrap();
        assert_eq!(store.len(), 0);
    }
}
