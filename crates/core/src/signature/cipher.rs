//! Notify payload encryption (`req_info` on refund callbacks)
//!
//! The cipher key is the lowercase hex MD5 of the merchant's raw key, used
//! as 32 ASCII bytes for AES-256-ECB.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use paybridge_common::crypto::{ecb, md5_hex};
use paybridge_domain::{Document, PayBridgeError, Result};

use crate::codec::XmlCodec;
use crate::errors::IntoPayBridgeError;

fn derive_key(raw_key: &str) -> String {
    md5_hex(raw_key.as_bytes())
}

/// Decrypt a base64 `req_info` value into a document.
///
/// # Errors
/// Returns [`PayBridgeError::Crypto`] for bad base64, block length, padding
/// or UTF-8, and [`PayBridgeError::Encoding`] if the plaintext is not XML.
pub fn decrypt_notify_payload(raw_key: &str, encoded: &str) -> Result<Document> {
    let ciphertext = BASE64
        .decode(encoded.trim())
        .map_err(|e| PayBridgeError::Crypto(format!("req_info is not valid base64: {e}")))?;

    let key = derive_key(raw_key);
    let plaintext =
        ecb::decrypt(key.as_bytes(), &ciphertext).map_err(IntoPayBridgeError::into_paybridge)?;
    let xml = String::from_utf8(plaintext)
        .map_err(|e| PayBridgeError::Crypto(format!("decrypted req_info is not UTF-8: {e}")))?;

    XmlCodec::default().decode(xml.as_bytes())
}

/// Inverse of [`decrypt_notify_payload`], for tests and local tooling.
///
/// # Errors
/// Returns [`PayBridgeError::Crypto`] if encryption fails.
pub fn encrypt_notify_payload(raw_key: &str, doc: &Document) -> Result<String> {
    let xml = XmlCodec::default().encode(doc).bytes;
    let key = derive_key(raw_key);
    let ciphertext = ecb::encrypt(key.as_bytes(), &xml).map_err(IntoPayBridgeError::into_paybridge)?;
    Ok(BASE64.encode(ciphertext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_with_derived_key() {
        let doc = Document::new().with("out_refund_no", "R20240101").with("refund_fee", 100);
        let encoded = encrypt_notify_payload("merchant-key", &doc).unwrap();
        let decoded = decrypt_notify_payload("merchant-key", &encoded).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn failures_map_to_crypto() {
        assert!(matches!(decrypt_notify_payload("k", "%%%"), Err(PayBridgeError::Crypto(_))));
        // 15 bytes: not block aligned.
        let short = BASE64.encode([0u8; 15]);
        assert!(matches!(decrypt_notify_payload("k", &short), Err(PayBridgeError::Crypto(_))));
    }
}
