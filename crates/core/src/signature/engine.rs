//! Request signing and inbound signature validation

use paybridge_common::crypto::{constant_time_eq, hmac_sha256_hex, md5_hex, sha1_hex};
use paybridge_domain::constants::{FIELD_SIGN, FIELD_SIGN_TYPE};
use paybridge_domain::{Document, PayBridgeError, Result, SignType};
use tracing::{debug, warn};

use super::canonical::SignablePayload;
use crate::errors::IntoPayBridgeError;

/// Sign the canonical string of `doc` (minus `sign`).
///
/// - MD5: `md5(canonical + "&key=" + key)`, uppercase hex
/// - HMAC-SHA256: keyed with `key` over the canonical string, uppercase hex
/// - SHA1: `sha1(canonical)`, lowercase hex; `key` is ignored
///
/// # Errors
/// Returns [`PayBridgeError::Crypto`] if the MAC cannot be initialised.
pub fn sign(doc: &Document, key: &str, sign_type: SignType) -> Result<String> {
    sign_payload(&SignablePayload::new(doc.clone()), key, sign_type)
}

/// Sign a payload with caller-chosen exclusions.
///
/// # Errors
/// See [`sign`].
pub fn sign_payload(payload: &SignablePayload, key: &str, sign_type: SignType) -> Result<String> {
    let canonical = payload.canonical_string();
    match sign_type {
        SignType::Md5 => {
            let message = format!("{canonical}&key={key}");
            Ok(md5_hex(message.as_bytes()).to_uppercase())
        }
        SignType::HmacSha256 => hmac_sha256_hex(key.as_bytes(), canonical.as_bytes())
            .map(|mac| mac.to_uppercase())
            .map_err(IntoPayBridgeError::into_paybridge),
        SignType::Sha1 => Ok(sha1_hex(canonical.as_bytes())),
    }
}

/// SHA1 of a pre-built message, lowercase hex.
#[must_use]
pub fn sign_message_sha1(message: &str) -> String {
    sha1_hex(message.as_bytes())
}

/// Add `sign_type` and `sign` to `doc` in place.
///
/// # Errors
/// See [`sign`].
pub fn sign_document(doc: &mut Document, key: &str, sign_type: SignType) -> Result<()> {
    doc.insert(FIELD_SIGN_TYPE, sign_type.as_str());
    let signature = sign(doc, key, sign_type)?;
    doc.insert(FIELD_SIGN, signature);
    Ok(())
}

/// Check the `sign` field of an inbound document.
///
/// The scheme comes from the document's `sign_type` field, MD5 when absent.
/// Comparison is constant time. A missing `sign` or an unknown `sign_type`
/// never validates.
#[must_use]
pub fn validate(doc: &Document, key: &str) -> bool {
    let Some(provided) = doc.get_str(FIELD_SIGN) else {
        debug!("Inbound document carries no sign field");
        return false;
    };

    let sign_type = match doc.get_str(FIELD_SIGN_TYPE) {
        None => SignType::Md5,
        Some(raw) => match raw.parse::<SignType>() {
            Ok(sign_type) => sign_type,
            Err(_) => {
                warn!(sign_type = %raw, "Unknown sign_type on inbound document");
                return false;
            }
        },
    };

    match sign(doc, key, sign_type) {
        Ok(expected) => constant_time_eq(expected.as_bytes(), provided.as_bytes()),
        Err(_) => false,
    }
}

/// [`validate`] as a `Result`.
///
/// # Errors
/// Returns [`PayBridgeError::SignatureMismatch`] when validation fails.
pub fn verify(doc: &Document, key: &str) -> Result<()> {
    if validate(doc, key) {
        Ok(())
    } else {
        Err(PayBridgeError::SignatureMismatch("inbound signature does not match".to_string()))
    }
}
