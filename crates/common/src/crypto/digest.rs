//! Hex digests, HMAC and constant-time comparison.
//!
//! All functions return lowercase hex; callers that need the uppercase wire
//! form convert at the call site.

use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{CommonError, CommonResult};

type HmacSha256 = Hmac<Sha256>;

#[must_use]
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

#[must_use]
pub fn sha1_hex(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// HMAC-SHA256 of `message` under `key`.
///
/// # Errors
/// Returns [`CommonError::Crypto`] if the MAC rejects the key length. HMAC
/// accepts keys of any length, so this does not happen in practice.
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> CommonResult<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| CommonError::crypto("HMAC-SHA256", e.to_string()))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Compare two byte strings without early exit on the first differing byte.
///
/// Length differences are not hidden.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
