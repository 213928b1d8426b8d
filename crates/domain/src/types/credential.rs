//! Caller-owned credential material

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// PEM material for the mutual-TLS transport profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCertificate {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
    pub root_ca_path: PathBuf,
}

/// Application identity plus the keys used to sign and decrypt.
///
/// Owned by the caller and only ever borrowed by the signer, the dispatcher
/// and the token cache.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub app_id: String,
    pub secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symmetric_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate: Option<ClientCertificate>,
}

impl Credential {
    #[must_use]
    pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            secret: secret.into(),
            sign_key: None,
            symmetric_key: None,
            client_certificate: None,
        }
    }

    #[must_use]
    pub fn with_sign_key(mut self, key: impl Into<String>) -> Self {
        self.sign_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_symmetric_key(mut self, key: impl Into<String>) -> Self {
        self.symmetric_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_client_certificate(mut self, certificate: ClientCertificate) -> Self {
        self.client_certificate = Some(certificate);
        self
    }

    /// Key for notify payload decryption, falling back to the signing key.
    #[must_use]
    pub fn notify_key(&self) -> Option<&str> {
        self.symmetric_key.as_deref().or(self.sign_key.as_deref())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("app_id", &self.app_id)
            .field("secret", &"[REDACTED]")
            .field("sign_key", &self.sign_key.as_ref().map(|_| "[REDACTED]"))
            .field("symmetric_key", &self.symmetric_key.as_ref().map(|_| "[REDACTED]"))
            .field("client_certificate", &self.client_certificate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let credential = Credential::new("wx123", "s3cr3t").with_sign_key("k3y");
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("wx123"));
        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("k3y"));
    }

    #[test]
    fn notify_key_prefers_symmetric_key() {
        let credential = Credential::new("a", "b").with_sign_key("sign");
        assert_eq!(credential.notify_key(), Some("sign"));
        let credential = credential.with_symmetric_key("aes");
        assert_eq!(credential.notify_key(), Some("aes"));
    }
}
