//! Uniform response wrapper for both wire formats

use std::sync::OnceLock;

use paybridge_domain::{Document, PayBridgeError, Result, WireFormat};

use crate::codec;

/// Status, raw body and declared format of a dispatched call.
///
/// Transport failures are carried in [`Self::error`] instead of being
/// returned. The body is decoded on first access to [`Self::document`] and
/// the result is memoized.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    status: u16,
    bytes: Vec<u8>,
    format: WireFormat,
    error: Option<PayBridgeError>,
    parsed: OnceLock<Result<Document>>,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn new(status: u16, bytes: Vec<u8>, format: WireFormat) -> Self {
        Self { status, bytes, format, error: None, parsed: OnceLock::new() }
    }

    /// Envelope for a call that never produced a response.
    #[must_use]
    pub fn from_error(error: PayBridgeError, format: WireFormat) -> Self {
        Self { status: 0, bytes: Vec::new(), format, error: Some(error), parsed: OnceLock::new() }
    }

    /// HTTP status; `0` when no response was received
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub const fn format(&self) -> WireFormat {
        self.format
    }

    #[must_use]
    pub const fn error(&self) -> Option<&PayBridgeError> {
        self.error.as_ref()
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// No transport error and a 2xx status
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Decoded body. An empty body decodes to an empty document.
    ///
    /// # Errors
    /// Returns the transport error for error envelopes, or
    /// [`PayBridgeError::Encoding`] if the body does not decode.
    pub fn document(&self) -> Result<&Document> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        self.parsed
            .get_or_init(|| {
                if self.bytes.iter().all(u8::is_ascii_whitespace) {
                    Ok(Document::new())
                } else {
                    codec::decode(&self.bytes, self.format)
                }
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Owned copy of [`Self::document`].
    ///
    /// # Errors
    /// See [`Self::document`].
    pub fn to_document(&self) -> Result<Document> {
        self.document().cloned()
    }
}
