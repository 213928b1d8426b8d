//! Verification and dispatch of inbound notifications

use std::sync::Arc;

use async_trait::async_trait;
use paybridge_common::utils::nonce_str;
use paybridge_domain::constants::{
    FIELD_APPID, FIELD_MCH_ID, FIELD_NONCE_STR, FIELD_PREPAY_ID, FIELD_REQ_INFO, FIELD_SIGN,
};
use paybridge_domain::{Credential, Document, PayBridgeError, Result, SignType};
use tracing::{debug, error, info, warn};

use super::ack::NotifyAck;
use crate::codec::{XmlCodec, XmlOptions};
use crate::signature::{decrypt_notify_payload, sign, verify};

/// Callback family, one per inbound endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyKind {
    /// Payment result, signed
    Paid,
    /// Refund result, with an encrypted `req_info`
    Refunded,
    /// Scanned-order request, answered with a `prepay_id`
    Scanned,
}

paybridge_domain::impl_wire_name_conversions!(NotifyKind {
    Paid => "paid",
    Refunded => "refunded",
    Scanned => "scanned",
});

impl NotifyKind {
    pub const ALL: [Self; 3] = [Self::Paid, Self::Refunded, Self::Scanned];
}

/// Application code that consumes verified notifications.
///
/// The returned document is only read for [`NotifyKind::Scanned`], where it
/// must carry `prepay_id`. An error turns the acknowledgement into FAIL with
/// the error text.
#[async_trait]
pub trait NotifyHandler: Send + Sync {
    async fn handle(&self, kind: NotifyKind, payload: Document) -> Result<Document>;
}

/// Decodes, verifies and dispatches callback bodies.
///
/// Bodies are decoded without scalar casting, so handlers receive every
/// field as the exact string the platform signed. The decrypted refund
/// `req_info` is decoded with the default casts.
pub struct NotifyProcessor {
    credential: Credential,
    mch_id: Option<String>,
    handler: Arc<dyn NotifyHandler>,
    codec: XmlCodec,
}

impl NotifyProcessor {
    pub fn new(credential: Credential, handler: Arc<dyn NotifyHandler>) -> Self {
        let codec = XmlCodec::new(XmlOptions::default().with_casting(false));
        Self { credential, mch_id: None, handler, codec }
    }

    /// Merchant id echoed in scanned-order acknowledgements.
    #[must_use]
    pub fn with_merchant_id(mut self, mch_id: impl Into<String>) -> Self {
        self.mch_id = Some(mch_id.into());
        self
    }

    /// Replace the body decoder. Signature checks assume it leaves leaf text
    /// uncast.
    #[must_use]
    pub fn with_codec(mut self, codec: XmlCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Process one callback body. Never fails; every outcome is an ack.
    pub async fn process(&self, kind: NotifyKind, body: &[u8]) -> NotifyAck {
        let ack = match kind {
            NotifyKind::Paid => self.process_paid(body).await,
            NotifyKind::Refunded => self.process_refunded(body).await,
            NotifyKind::Scanned => self.process_scanned(body).await,
        };

        match &ack {
            Ok(ack) if ack.is_success() => info!(kind = %kind, "Notification acknowledged"),
            Ok(_) => warn!(kind = %kind, "Notification rejected"),
            Err(e) => error!(kind = %kind, error = %e, "Notification processing failed"),
        }

        ack.unwrap_or_else(|e| match kind {
            NotifyKind::Scanned => NotifyAck::fail_with_description(e.to_string()),
            NotifyKind::Paid | NotifyKind::Refunded => NotifyAck::fail(e.to_string()),
        })
    }

    async fn process_paid(&self, body: &[u8]) -> Result<NotifyAck> {
        let payload = self.decode_verified(body)?;
        self.handler.handle(NotifyKind::Paid, payload).await?;
        Ok(NotifyAck::success())
    }

    async fn process_refunded(&self, body: &[u8]) -> Result<NotifyAck> {
        let mut payload = self.codec.decode(body)?;

        let key = self
            .credential
            .notify_key()
            .ok_or_else(|| PayBridgeError::Config("no key configured for refund notifications".to_string()))?;
        let encrypted = payload
            .get_str(FIELD_REQ_INFO)
            .ok_or_else(|| PayBridgeError::InvalidInput("refund notification carries no req_info".to_string()))?;

        let info = decrypt_notify_payload(key, encrypted)?;
        debug!(fields = info.len(), "Decrypted refund req_info");
        payload.insert(FIELD_REQ_INFO, info);

        self.handler.handle(NotifyKind::Refunded, payload).await?;
        Ok(NotifyAck::success())
    }

    async fn process_scanned(&self, body: &[u8]) -> Result<NotifyAck> {
        let payload = self.decode_verified(body)?;
        let reply = self.handler.handle(NotifyKind::Scanned, payload).await?;

        let Some(prepay_id) = reply.get(FIELD_PREPAY_ID).cloned() else {
            warn!("Scanned-order handler returned no prepay_id");
            return Ok(NotifyAck::fail_with_description("nil prepay_id"));
        };

        let mut ack = NotifyAck::success();
        ack.set(FIELD_APPID, self.credential.app_id.as_str());
        ack.set(FIELD_MCH_ID, self.mch_id.clone().unwrap_or_default());
        ack.set(FIELD_NONCE_STR, nonce_str());
        ack.set(FIELD_PREPAY_ID, prepay_id);

        let signature = sign(ack.document(), self.sign_key()?, SignType::Md5)?;
        ack.set(FIELD_SIGN, signature);
        Ok(ack)
    }

    fn decode_verified(&self, body: &[u8]) -> Result<Document> {
        let payload = self.codec.decode(body)?;
        verify(&payload, self.sign_key()?)?;
        Ok(payload)
    }

    fn sign_key(&self) -> Result<&str> {
        self.credential
            .sign_key
            .as_deref()
            .ok_or_else(|| PayBridgeError::Config("no signing key configured for notifications".to_string()))
    }
}
