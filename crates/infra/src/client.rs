//! Client facade tying configuration, dispatch and token caching together

use std::sync::Arc;

use paybridge_core::{AccessTokenCache, KeyValueStore, NotifyHandler, NotifyProcessor, ResponseEnvelope};
use paybridge_domain::constants::{ACCESS_TOKEN_KEY, SANDBOX_URL_SUFFIX};
use paybridge_domain::{CachedToken, ClientConfig, Credential, Document, Result, TransportProfile, WireFormat};
use tracing::debug;

use crate::cache::MemoryStore;
use crate::http::{DispatchRequest, TransportDispatcher};
use crate::token::HttpCredentialExchanger;

/// One configured application on the platform.
///
/// Holds the configuration, both transport profiles and the token cache.
/// Cheap to share behind an `Arc`; all methods take `&self`.
pub struct PlatformClient {
    config: ClientConfig,
    credential: Credential,
    dispatcher: Arc<TransportDispatcher>,
    tokens: AccessTokenCache,
}

impl PlatformClient {
    /// Client with an in-memory token store.
    ///
    /// # Errors
    /// Returns [`paybridge_domain::PayBridgeError::ConfigurationFatal`] when
    /// certificate material is configured but unusable.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Client whose tokens live in `store`.
    ///
    /// # Errors
    /// See [`Self::new`].
    pub fn with_store(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let credential = config.credential()?;
        let dispatcher = Arc::new(TransportDispatcher::from_config(&config)?);
        let exchanger = Arc::new(HttpCredentialExchanger::new(Arc::clone(&dispatcher), &config.token_base_url));
        let tokens = AccessTokenCache::with_namespace(store, exchanger, &config.cache_namespace);

        debug!(app_id = %config.app_id, sandbox = config.sandbox, mutual_tls = dispatcher.has_mutual_tls(), "Platform client ready");
        Ok(Self { config, credential, dispatcher, tokens })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    #[must_use]
    pub fn dispatcher(&self) -> &TransportDispatcher {
        &self.dispatcher
    }

    #[must_use]
    pub const fn token_cache(&self) -> &AccessTokenCache {
        &self.tokens
    }

    /// Absolute API URL for `uri`, under `/sandboxnew` in sandbox mode.
    #[must_use]
    pub fn link(&self, uri: &str) -> String {
        let base = self.config.api_base_url.trim_end_matches('/');
        let uri = uri.trim_start_matches('/');
        if self.config.sandbox {
            format!("{base}{SANDBOX_URL_SUFFIX}/{uri}")
        } else {
            format!("{base}/{uri}")
        }
    }

    /// Current access token, exchanged when missing or when `force_refresh`.
    ///
    /// # Errors
    /// Propagates store, transport and `Auth` errors.
    pub async fn access_token(&self, force_refresh: bool) -> Result<CachedToken> {
        self.tokens.get_token(&self.credential, force_refresh).await
    }

    /// Send `request` with the access token attached as a query parameter.
    ///
    /// # Errors
    /// Only token acquisition fails here; transport failures stay in the
    /// envelope.
    pub async fn request_with_token(&self, request: DispatchRequest) -> Result<ResponseEnvelope> {
        let token = self.access_token(false).await?;
        let request = request.query_param(ACCESS_TOKEN_KEY, token.access_token);
        Ok(self.dispatcher.send(request).await)
    }

    /// Signed XML payment call to `uri` over `profile`.
    pub async fn payment_request(&self, uri: &str, profile: TransportProfile, body: Document) -> ResponseEnvelope {
        let request = DispatchRequest::new(self.link(uri))
            .profile(profile)
            .format(WireFormat::Xml)
            .document(body)
            .payment(true);
        self.dispatcher.send(request).await
    }

    /// Notify processor using this client's keys and merchant id.
    pub fn notify_processor(&self, handler: Arc<dyn NotifyHandler>) -> NotifyProcessor {
        NotifyProcessor::new(self.credential.clone(), handler).with_merchant_id(self.config.mch_id.as_str())
    }
}
