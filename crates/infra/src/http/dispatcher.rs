//! HTTP dispatch over the two TLS trust profiles
//!
//! Both reqwest clients are built up front. [`TransportDispatcher::send`]
//! never returns an error: transport and preparation failures are carried in
//! the [`ResponseEnvelope`].

use std::time::Duration;

use paybridge_common::utils::nonce_str;
use paybridge_core::codec;
use paybridge_core::signature::sign_document;
use paybridge_core::ResponseEnvelope;
use paybridge_domain::constants::{FIELD_MCH_ID, FIELD_NONCE_STR, FIELD_SUB_APPID, FIELD_SUB_MCH_ID};
use paybridge_domain::{
    ClientCertificate, ClientConfig, Document, PayBridgeError, RequestMethod, Result, SignType, TransportProfile,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as ReqwestClient, Method};
use tracing::{debug, info, warn};
use url::Url;

use super::request::{DispatchRequest, RequestBody};
use super::tls::TlsMaterial;
use crate::errors::InfraError;

/// Merchant fields added to payment-style calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSettings {
    pub mch_id: String,
    pub sign_key: Option<String>,
    pub sub_mch_id: Option<String>,
    pub sub_appid: Option<String>,
}

impl PaymentSettings {
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            mch_id: config.mch_id.clone(),
            sign_key: config.key.clone(),
            sub_mch_id: config.sub_mch_id.clone(),
            sub_appid: config.sub_appid.clone(),
        }
    }

    /// Add `mch_id`, `nonce_str`, the optional sub-merchant fields,
    /// `sign_type` and `sign`.
    fn apply(&self, doc: &mut Document) -> Result<()> {
        let key = self
            .sign_key
            .as_deref()
            .ok_or_else(|| PayBridgeError::Config("payment call requires a signing key".to_string()))?;

        doc.insert(FIELD_MCH_ID, self.mch_id.as_str());
        doc.insert(FIELD_NONCE_STR, nonce_str());
        if let Some(sub_mch_id) = &self.sub_mch_id {
            doc.insert(FIELD_SUB_MCH_ID, sub_mch_id.as_str());
        }
        if let Some(sub_appid) = &self.sub_appid {
            doc.insert(FIELD_SUB_APPID, sub_appid.as_str());
        }
        sign_document(doc, key, SignType::Md5)
    }
}

/// Sends [`DispatchRequest`]s and wraps the outcome in a [`ResponseEnvelope`].
#[derive(Clone)]
pub struct TransportDispatcher {
    insecure: ReqwestClient,
    mutual_tls: Option<ReqwestClient>,
    payment: PaymentSettings,
}

impl TransportDispatcher {
    /// Start building a new dispatcher.
    pub fn builder() -> TransportDispatcherBuilder {
        TransportDispatcherBuilder::default()
    }

    /// Dispatcher for everything `config` describes.
    ///
    /// # Errors
    /// Returns [`PayBridgeError::ConfigurationFatal`] when certificate
    /// material is partially configured or cannot be loaded.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .client_certificate(config.client_certificate()?)
            .payment(PaymentSettings::from_config(config));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    #[must_use]
    pub const fn has_mutual_tls(&self) -> bool {
        self.mutual_tls.is_some()
    }

    /// Execute one call. Never fails; inspect the envelope instead.
    pub async fn send(&self, request: DispatchRequest) -> ResponseEnvelope {
        let format = request.format;
        match self.try_send(request).await {
            Ok(envelope) => envelope,
            Err(error) => {
                warn!(error = %error, "HTTP dispatch failed");
                ResponseEnvelope::from_error(error, format)
            }
        }
    }

    async fn try_send(&self, request: DispatchRequest) -> Result<ResponseEnvelope> {
        let client = self.client_for(request.profile)?;
        let url = Url::parse(&request.url).map_err(|e| PayBridgeError::from(InfraError::from(e)))?;
        let body = self.prepare_body(&request)?;

        let method = match request.method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
        };
        debug!(%method, %url, profile = %request.profile, format = %request.format, "Sending HTTP request");

        let mut builder = client.request(method.clone(), url.clone());
        let query = request.query_pairs();
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, request.format.content_type()).body(body);
        }

        let response = builder.send().await.map_err(|e| PayBridgeError::from(InfraError::from(e)))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| PayBridgeError::from(InfraError::from(e)))?;

        info!(%method, %url, status = status.as_u16(), bytes = bytes.len(), "Received HTTP response");
        Ok(ResponseEnvelope::new(status.as_u16(), bytes.to_vec(), request.format))
    }

    fn client_for(&self, profile: TransportProfile) -> Result<&ReqwestClient> {
        match profile {
            TransportProfile::Insecure => Ok(&self.insecure),
            TransportProfile::MutualTls => self.mutual_tls.as_ref().ok_or_else(|| {
                PayBridgeError::ConfigurationFatal("mutual TLS profile has no client certificate configured".to_string())
            }),
        }
    }

    fn prepare_body(&self, request: &DispatchRequest) -> Result<Option<Vec<u8>>> {
        let mut doc = match &request.body {
            RequestBody::Raw(_) if request.payment => {
                return Err(PayBridgeError::InvalidInput("payment calls need a document body".to_string()));
            }
            RequestBody::Raw(bytes) => return Ok(Some(bytes.clone())),
            RequestBody::Empty if !request.payment => return Ok(None),
            RequestBody::Empty => Document::new(),
            RequestBody::Document(doc) => doc.clone(),
        };

        if request.payment {
            self.payment.apply(&mut doc)?;
        }
        codec::encode(&doc, request.format).map(Some)
    }
}

/// Builder for [`TransportDispatcher`].
#[derive(Debug, Default)]
pub struct TransportDispatcherBuilder {
    timeout: Option<Duration>,
    client_certificate: Option<ClientCertificate>,
    payment: PaymentSettings,
}

impl TransportDispatcherBuilder {
    /// Per-request timeout. None is imposed unless set.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn client_certificate(mut self, certificate: Option<ClientCertificate>) -> Self {
        self.client_certificate = certificate;
        self
    }

    #[must_use]
    pub fn payment(mut self, payment: PaymentSettings) -> Self {
        self.payment = payment;
        self
    }

    /// Build both clients.
    ///
    /// # Errors
    /// Returns [`PayBridgeError::ConfigurationFatal`] if configured TLS
    /// material cannot be loaded, or [`PayBridgeError::Internal`] if the
    /// insecure client cannot be built.
    pub fn build(self) -> Result<TransportDispatcher> {
        let mut insecure = ReqwestClient::builder().danger_accept_invalid_certs(true).no_proxy();
        if let Some(timeout) = self.timeout {
            insecure = insecure.timeout(timeout);
        }
        let insecure = insecure
            .build()
            .map_err(|e| PayBridgeError::Internal(format!("failed to build HTTP client: {e}")))?;

        let mutual_tls = match &self.client_certificate {
            Some(certificate) => {
                let material = TlsMaterial::load(certificate)?;
                let mut builder = ReqwestClient::builder()
                    .use_rustls_tls()
                    .identity(material.identity)
                    .add_root_certificate(material.root_ca);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder.build().map_err(|e| {
                    PayBridgeError::ConfigurationFatal(format!("failed to build mutual TLS client: {e}"))
                })?;
                info!(cert = %certificate.cert_path.display(), "Mutual TLS profile ready");
                Some(client)
            }
            None => None,
        };

        Ok(TransportDispatcher { insecure, mutual_tls, payment: self.payment })
    }
}
