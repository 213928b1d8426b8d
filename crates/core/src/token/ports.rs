//! Port interfaces for access-token acquisition

use async_trait::async_trait;
use paybridge_domain::{Credential, Result, TokenRecord};

/// Exchanges application credentials for a fresh access token.
#[async_trait]
pub trait CredentialExchanger: Send + Sync {
    /// # Errors
    /// [`paybridge_domain::PayBridgeError::Auth`] when the identity endpoint
    /// rejects the credentials, `Transport` on network failure.
    async fn exchange(&self, credential: &Credential) -> Result<TokenRecord>;
}
