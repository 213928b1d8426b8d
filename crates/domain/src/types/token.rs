//! Access token records and TTL arithmetic

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TOKEN_LIFETIME_SECS, TOKEN_SAFE_SECONDS};

/// Persisted cache value and credential-exchange reply shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    #[serde(default = "default_lifetime")]
    pub expires_in: i64,
}

const fn default_lifetime() -> i64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}

/// Token handed back to callers of the token cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
    pub access_token: String,
    /// Lifetime reported by the identity endpoint, in seconds
    pub expires_in: i64,
    /// Set when the token was freshly exchanged; unknown when served from cache
    pub issued_at: Option<DateTime<Utc>>,
    pub cache_key: String,
}

impl CachedToken {
    #[must_use]
    pub fn from_record(record: TokenRecord, cache_key: String, issued_at: Option<DateTime<Utc>>) -> Self {
        Self { access_token: record.access_token, expires_in: record.expires_in, issued_at, cache_key }
    }

    #[must_use]
    pub fn record(&self) -> TokenRecord {
        TokenRecord { access_token: self.access_token.clone(), expires_in: self.expires_in }
    }

    /// TTL the cache entry for this token is stored with.
    #[must_use]
    pub fn effective_ttl(&self) -> Duration {
        effective_ttl(self.expires_in)
    }
}

/// Cache TTL for a token lifetime: 500 seconds short of real expiry, never
/// negative.
#[must_use]
pub fn effective_ttl(lifetime_secs: i64) -> Duration {
    let secs = lifetime_secs.saturating_sub(TOKEN_SAFE_SECONDS).max(0);
    Duration::from_secs(secs.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_keeps_safety_margin() {
        assert_eq!(effective_ttl(7200), Duration::from_secs(6700));
        assert_eq!(effective_ttl(500), Duration::ZERO);
    }

    #[test]
    fn ttl_never_negative() {
        assert_eq!(effective_ttl(400), Duration::ZERO);
        assert_eq!(effective_ttl(-10), Duration::ZERO);
    }

    #[test]
    fn record_defaults_lifetime_when_missing() {
        let record: TokenRecord = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(record.expires_in, 7200);
    }
}
