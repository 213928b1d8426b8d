//! Signing, validation and notify payload decryption

pub mod canonical;
pub mod cipher;
pub mod engine;

pub use canonical::{canonicalize, SignablePayload};
pub use cipher::{decrypt_notify_payload, encrypt_notify_payload};
pub use engine::{sign, sign_document, sign_message_sha1, sign_payload, validate, verify};
