//! Client configuration
//!
//! [`ClientConfig`] is a plain serde struct so embedding applications can
//! deserialize it from whatever they already use. [`ConfigSource`] is the
//! read-only lookup seam used by the environment loader in `paybridge-infra`.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_CACHE_NAMESPACE, DEFAULT_TOKEN_BASE_URL};
use crate::errors::{PayBridgeError, Result};
use crate::types::{ClientCertificate, Credential};

/// Read-mostly key lookup with typed defaults.
pub trait ConfigSource {
    /// Raw lookup; `None` when the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    fn string_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
            _ => default,
        }
    }

    fn int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Everything a client needs to talk to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub app_id: String,
    pub secret: String,
    #[serde(default)]
    pub mch_id: String,
    /// Merchant signing key
    #[serde(default)]
    pub key: Option<String>,
    /// Notify decryption key; falls back to `key`
    #[serde(default)]
    pub aes_key: Option<String>,
    #[serde(default)]
    pub sub_mch_id: Option<String>,
    #[serde(default)]
    pub sub_appid: Option<String>,
    #[serde(default)]
    pub cert_path: Option<PathBuf>,
    #[serde(default)]
    pub key_path: Option<PathBuf>,
    #[serde(default)]
    pub rootca_path: Option<PathBuf>,
    #[serde(default)]
    pub sandbox: bool,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_token_base_url")]
    pub token_base_url: String,
    #[serde(default = "default_cache_namespace")]
    pub cache_namespace: String,
    /// Optional request timeout; none is imposed by default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_token_base_url() -> String {
    DEFAULT_TOKEN_BASE_URL.to_string()
}

fn default_cache_namespace() -> String {
    DEFAULT_CACHE_NAMESPACE.to_string()
}

impl ClientConfig {
    /// Minimal configuration for token-authenticated calls.
    #[must_use]
    pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            secret: secret.into(),
            mch_id: String::new(),
            key: None,
            aes_key: None,
            sub_mch_id: None,
            sub_appid: None,
            cert_path: None,
            key_path: None,
            rootca_path: None,
            sandbox: false,
            api_base_url: default_api_base_url(),
            token_base_url: default_token_base_url(),
            cache_namespace: default_cache_namespace(),
            timeout_secs: None,
        }
    }

    /// Build from any lookup source. `app_id` and `secret` are required.
    ///
    /// # Errors
    /// Returns [`PayBridgeError::Config`] when a required key is missing.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self> {
        let required = |key: &str| {
            source
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| PayBridgeError::Config(format!("missing required key '{key}'")))
        };
        let optional = |key: &str| source.get(key).filter(|v| !v.trim().is_empty());

        let timeout = source.int_or("timeout_secs", 0);

        Ok(Self {
            app_id: required("app_id")?,
            secret: required("secret")?,
            mch_id: source.string_or("mch_id", ""),
            key: optional("key"),
            aes_key: optional("aes_key"),
            sub_mch_id: optional("sub_mch_id"),
            sub_appid: optional("sub_appid"),
            cert_path: optional("cert_path").map(PathBuf::from),
            key_path: optional("key_path").map(PathBuf::from),
            rootca_path: optional("rootca_path").map(PathBuf::from),
            sandbox: source.bool_or("sandbox", false),
            api_base_url: source.string_or("api_base_url", DEFAULT_API_BASE_URL),
            token_base_url: source.string_or("token_base_url", DEFAULT_TOKEN_BASE_URL),
            cache_namespace: source.string_or("cache_namespace", DEFAULT_CACHE_NAMESPACE),
            timeout_secs: u64::try_from(timeout).ok().filter(|t| *t > 0),
        })
    }

    /// Mutual-TLS material, if configured.
    ///
    /// # Errors
    /// Returns [`PayBridgeError::ConfigurationFatal`] when only part of the
    /// certificate/key/CA triple is present.
    pub fn client_certificate(&self) -> Result<Option<ClientCertificate>> {
        match (&self.cert_path, &self.key_path, &self.rootca_path) {
            (None, None, None) => Ok(None),
            (Some(cert), Some(key), Some(ca)) => Ok(Some(ClientCertificate {
                cert_path: cert.clone(),
                key_path: key.clone(),
                root_ca_path: ca.clone(),
            })),
            _ => Err(PayBridgeError::ConfigurationFatal(
                "cert_path, key_path and rootca_path must be configured together".to_string(),
            )),
        }
    }

    /// Credential view of this configuration.
    ///
    /// # Errors
    /// Propagates [`Self::client_certificate`] failures.
    pub fn credential(&self) -> Result<Credential> {
        let mut credential = Credential::new(&self.app_id, &self.secret);
        credential.sign_key = self.key.clone();
        credential.symmetric_key = self.aes_key.clone();
        credential.client_certificate = self.client_certificate()?;
        Ok(credential)
    }
}
