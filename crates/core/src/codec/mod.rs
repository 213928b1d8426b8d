//! Wire codecs
//!
//! [`encode`] and [`decode`] dispatch on [`WireFormat`] with default options;
//! use [`XmlCodec`] directly to control array padding or schema hints.

pub mod json;
pub mod xml;

use paybridge_domain::{Document, Result, WireFormat};

pub use xml::{SkippedField, XmlCodec, XmlEncoding, XmlOptions};

/// Encode `doc` in the given wire format.
///
/// XML field-local failures are logged and skipped rather than returned.
///
/// # Errors
/// Returns [`paybridge_domain::PayBridgeError::Encoding`] when JSON
/// serialization fails.
pub fn encode(doc: &Document, format: WireFormat) -> Result<Vec<u8>> {
    match format {
        WireFormat::Xml => Ok(XmlCodec::default().encode(doc).bytes),
        WireFormat::Json => json::encode(doc),
    }
}

/// Decode bytes in the given wire format.
///
/// # Errors
/// Returns [`paybridge_domain::PayBridgeError::Encoding`] for malformed input.
pub fn decode(bytes: &[u8], format: WireFormat) -> Result<Document> {
    match format {
        WireFormat::Xml => XmlCodec::default().decode(bytes),
        WireFormat::Json => json::decode(bytes),
    }
}
