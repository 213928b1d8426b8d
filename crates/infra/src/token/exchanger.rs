//! HTTP [`CredentialExchanger`]
//!
//! `GET {token_base}/cgi-bin/token?grant_type=client_credential&appid=…&secret=…`
//! answers with `{"access_token": …, "expires_in": …}` or an `errcode`.

use std::sync::Arc;

use async_trait::async_trait;
use paybridge_core::CredentialExchanger;
use paybridge_domain::constants::{
    ACCESS_TOKEN_KEY, DEFAULT_TOKEN_LIFETIME_SECS, EXPIRES_IN_KEY, GRANT_TYPE_CLIENT_CREDENTIAL, TOKEN_URL_SUFFIX,
};
use paybridge_domain::{Credential, Document, PayBridgeError, Result, TokenRecord, WireFormat};
use tracing::{debug, warn};

use crate::http::{DispatchRequest, TransportDispatcher};

pub struct HttpCredentialExchanger {
    dispatcher: Arc<TransportDispatcher>,
    token_base_url: String,
}

impl HttpCredentialExchanger {
    pub fn new(dispatcher: Arc<TransportDispatcher>, token_base_url: impl Into<String>) -> Self {
        Self { dispatcher, token_base_url: token_base_url.into() }
    }

    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}{}", self.token_base_url.trim_end_matches('/'), TOKEN_URL_SUFFIX)
    }
}

#[async_trait]
impl CredentialExchanger for HttpCredentialExchanger {
    async fn exchange(&self, credential: &Credential) -> Result<TokenRecord> {
        let request = DispatchRequest::get(self.token_url())
            .format(WireFormat::Json)
            .query(
                Document::new()
                    .with("grant_type", GRANT_TYPE_CLIENT_CREDENTIAL)
                    .with("appid", credential.app_id.as_str())
                    .with("secret", credential.secret.as_str()),
            );

        debug!(app_id = %credential.app_id, "Requesting access token");
        let envelope = self.dispatcher.send(request).await;
        let reply = envelope.document()?;

        let errcode = reply.i64_or("errcode", 0);
        if errcode != 0 {
            let errmsg = reply.string_or("errmsg", "unknown error");
            warn!(app_id = %credential.app_id, errcode, errmsg = %errmsg, "Credential exchange rejected");
            return Err(PayBridgeError::Auth(format!("{errcode}: {errmsg}")));
        }

        let access_token = reply.string_or(ACCESS_TOKEN_KEY, "");
        if access_token.is_empty() {
            return Err(PayBridgeError::Auth(format!(
                "token endpoint answered HTTP {} without an access_token",
                envelope.status()
            )));
        }

        Ok(TokenRecord { access_token, expires_in: reply.i64_or(EXPIRES_IN_KEY, DEFAULT_TOKEN_LIFETIME_SECS) })
    }
}
