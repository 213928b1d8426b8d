//! Access-token cache service
//!
//! Tokens live in an external [`KeyValueStore`] under a key derived from the
//! credential identity. Refreshes for one key are serialized through a per-key
//! async mutex, and a waiter re-reads the store after acquiring it, so racing
//! callers cause a single credential exchange. The mutex is dropped from the
//! map once no caller holds it.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use paybridge_common::crypto::sha256_hex;
use paybridge_domain::constants::{DEFAULT_CACHE_NAMESPACE, DEFAULT_TOKEN_LIFETIME_SECS, GRANT_TYPE_CLIENT_CREDENTIAL};
use paybridge_domain::{effective_ttl, CachedToken, Credential, PayBridgeError, Result, TokenRecord};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::ports::CredentialExchanger;
use crate::cache_ports::KeyValueStore;

/// Identity fields hashed into the cache key.
#[derive(Serialize)]
struct CredentialIdentity<'a> {
    grant_type: &'a str,
    appid: &'a str,
    secret: &'a str,
}

/// Token cache over a pluggable store and exchanger
pub struct AccessTokenCache {
    store: Arc<dyn KeyValueStore>,
    exchanger: Arc<dyn CredentialExchanger>,
    namespace: String,
    refresh_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AccessTokenCache {
    pub fn new(store: Arc<dyn KeyValueStore>, exchanger: Arc<dyn CredentialExchanger>) -> Self {
        Self::with_namespace(store, exchanger, DEFAULT_CACHE_NAMESPACE)
    }

    pub fn with_namespace(
        store: Arc<dyn KeyValueStore>,
        exchanger: Arc<dyn CredentialExchanger>,
        namespace: impl Into<String>,
    ) -> Self {
        Self { store, exchanger, namespace: namespace.into(), refresh_locks: DashMap::new() }
    }

    /// `"<namespace>.access_token." + sha256(json(identity))`
    ///
    /// # Errors
    /// Returns [`PayBridgeError::Internal`] if the identity cannot be
    /// serialized.
    pub fn cache_key(&self, credential: &Credential) -> Result<String> {
        let identity = CredentialIdentity {
            grant_type: GRANT_TYPE_CLIENT_CREDENTIAL,
            appid: &credential.app_id,
            secret: &credential.secret,
        };
        let json = serde_json::to_vec(&identity)
            .map_err(|e| PayBridgeError::Internal(format!("failed to serialize credential identity: {e}")))?;
        Ok(format!("{}.access_token.{}", self.namespace, sha256_hex(&json)))
    }

    /// Return a live token, exchanging credentials when none is cached or
    /// `force_refresh` is set.
    ///
    /// # Errors
    /// Propagates store failures and exchanger errors (`Auth`, `Transport`).
    pub async fn get_token(&self, credential: &Credential, force_refresh: bool) -> Result<CachedToken> {
        let key = self.cache_key(credential)?;

        if !force_refresh {
            if let Some(token) = self.lookup(&key).await? {
                return Ok(token);
            }
        }

        let lock = self.refresh_lock(&key);
        let result = self.refresh_locked(&lock, &key, credential, force_refresh).await;
        drop(lock);
        self.refresh_locks.remove_if(&key, |_, entry| Arc::strong_count(entry) == 1);
        result
    }

    /// Always exchange and overwrite the cached token.
    ///
    /// # Errors
    /// See [`Self::get_token`].
    pub async fn refresh(&self, credential: &Credential) -> Result<CachedToken> {
        self.get_token(credential, true).await
    }

    /// Store a token obtained elsewhere. A missing lifetime defaults to 7200s.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn set_token(
        &self,
        credential: &Credential,
        access_token: impl Into<String>,
        lifetime_secs: Option<i64>,
    ) -> Result<CachedToken> {
        let key = self.cache_key(credential)?;
        let record = TokenRecord {
            access_token: access_token.into(),
            expires_in: lifetime_secs.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
        };
        self.persist(&key, &record).await?;
        Ok(CachedToken::from_record(record, key, Some(Utc::now())))
    }

    /// Drop the cached token for `credential`.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn forget(&self, credential: &Credential) -> Result<()> {
        let key = self.cache_key(credential)?;
        self.store.delete(&key).await?;
        debug!(cache_key = %key, "Forgot cached access token");
        Ok(())
    }

    async fn refresh_locked(
        &self,
        lock: &Mutex<()>,
        key: &str,
        credential: &Credential,
        force_refresh: bool,
    ) -> Result<CachedToken> {
        let _guard = lock.lock().await;

        if !force_refresh {
            if let Some(token) = self.lookup(key).await? {
                debug!(cache_key = %key, "Token refreshed by a concurrent caller");
                return Ok(token);
            }
        }

        let record = self.exchanger.exchange(credential).await?;
        info!(app_id = %credential.app_id, expires_in = record.expires_in, "Exchanged credentials for access token");

        self.persist(key, &record).await?;
        Ok(CachedToken::from_record(record, key.to_string(), Some(Utc::now())))
    }

    /// Lock entries live only while a refresh for the key is in flight.
    fn refresh_lock(&self, key: &str) -> Arc<Mutex<()>> {
        Arc::clone(self.refresh_locks.entry(key.to_string()).or_insert_with(|| Arc::new(Mutex::new(()))).value())
    }

    async fn lookup(&self, key: &str) -> Result<Option<CachedToken>> {
        let Some(raw) = self.store.get(key).await? else {
            debug!(cache_key = %key, "Token cache miss");
            return Ok(None);
        };

        match serde_json::from_str::<TokenRecord>(&raw) {
            Ok(record) if !record.access_token.is_empty() => {
                debug!(cache_key = %key, "Token cache hit");
                Ok(Some(CachedToken::from_record(record, key.to_string(), None)))
            }
            Ok(_) => {
                warn!(cache_key = %key, "Cached token entry is empty; treating as miss");
                Ok(None)
            }
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Cached token entry is corrupt; treating as miss");
                Ok(None)
            }
        }
    }

    async fn persist(&self, key: &str, record: &TokenRecord) -> Result<()> {
        let ttl = effective_ttl(record.expires_in);
        if ttl.is_zero() {
            warn!(cache_key = %key, expires_in = record.expires_in, "Token lifetime below safety margin; it will not be served from cache");
        }
        let value = serde_json::to_string(record)
            .map_err(|e| PayBridgeError::Internal(format!("failed to serialize token record: {e}")))?;
        self.store.set_with_ttl(key, value, ttl).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex as SyncMutex;

    use super::*;

    #[derive(Default)]
    struct RecordingStore {
        entries: SyncMutex<HashMap<String, (String, Duration)>>,
    }

    #[async_trait]
    impl KeyValueStore for RecordingStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().get(key).filter(|(_, ttl)| !ttl.is_zero()).map(|(v, _)| v.clone()))
        }

        async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
            self.entries.lock().insert(key.to_string(), (value, ttl));
            Ok(())
        }

        async fn has(&self, key: &str) -> Result<bool> {
            Ok(self.get(key).await?.is_some())
        }

        async fn delete(&self, key: &str) -> Result<()> {
            self.entries.lock().remove(key);
            Ok(())
        }
    }

    struct FixedExchanger {
        calls: AtomicUsize,
        expires_in: i64,
    }

    #[async_trait]
    impl CredentialExchanger for FixedExchanger {
        async fn exchange(&self, _credential: &Credential) -> Result<TokenRecord> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(TokenRecord { access_token: format!("token-{n}"), expires_in: self.expires_in })
        }
    }

    fn cache(expires_in: i64) -> (AccessTokenCache, Arc<RecordingStore>, Arc<FixedExchanger>) {
        let store = Arc::new(RecordingStore::default());
        let exchanger = Arc::new(FixedExchanger { calls: AtomicUsize::new(0), expires_in });
        let cache = AccessTokenCache::new(store.clone(), exchanger.clone());
        (cache, store, exchanger)
    }

    #[tokio::test]
    async fn stores_with_safety_margin_ttl() {
        let (cache, store, _) = cache(7200);
        let credential = Credential::new("wx1", "secret");

        let token = cache.get_token(&credential, false).await.unwrap();

        let entries = store.entries.lock();
        let (value, ttl) = entries.get(&token.cache_key).unwrap();
        assert_eq!(*ttl, Duration::from_secs(6700));
        assert_eq!(value, r#"{"access_token":"token-1","expires_in":7200}"#);
    }

    #[tokio::test]
    async fn cache_key_is_namespaced_and_stable() {
        let (cache, _, _) = cache(7200);
        let a = cache.cache_key(&Credential::new("wx1", "s")).unwrap();
        let b = cache.cache_key(&Credential::new("wx1", "s").with_sign_key("ignored")).unwrap();
        let c = cache.cache_key(&Credential::new("wx2", "s")).unwrap();

        assert!(a.starts_with("paybridge.access_token."));
        assert_eq!(a.len(), "paybridge.access_token.".len() + 64);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn refresh_locks_are_released_after_use() {
        let (cache, _, _) = cache(7200);
        cache.get_token(&Credential::new("wx1", "secret"), false).await.unwrap();
        cache.refresh(&Credential::new("wx2", "secret")).await.unwrap();
        assert!(cache.refresh_locks.is_empty());
    }

    #[tokio::test]
    async fn corrupt_entry_is_replaced() {
        let (cache, store, exchanger) = cache(7200);
        let credential = Credential::new("wx1", "secret");
        let key = cache.cache_key(&credential).unwrap();
        store.set_with_ttl(&key, "not-json".to_string(), Duration::from_secs(60)).await.unwrap();

        let token = cache.get_token(&credential, false).await.unwrap();
        assert_eq!(token.access_token, "token-1");
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 1);
    }
}
