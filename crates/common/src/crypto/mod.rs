//! Cryptographic primitives used by the signature engine.

pub mod digest;
pub mod ecb;

pub use digest::{constant_time_eq, hmac_sha256_hex, md5_hex, sha1_hex, sha256_hex};
