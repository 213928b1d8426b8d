//! Port interface for the external key-value store backing the token cache

use std::time::Duration;

use async_trait::async_trait;
use paybridge_domain::Result;

/// String key-value store with per-entry expiry.
///
/// Implementations must never serve an entry past its TTL; a zero TTL means
/// the entry is never served.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    async fn has(&self, key: &str) -> Result<bool>;

    async fn delete(&self, key: &str) -> Result<()>;
}
