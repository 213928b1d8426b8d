//! # PayBridge Core
//!
//! Protocol logic for the payment platform, free of HTTP and storage code.
//!
//! This crate contains:
//! - XML and JSON codecs over [`paybridge_domain::Document`]
//! - Request signing, signature validation and notify payload decryption
//! - The access-token cache service and its ports
//! - The response envelope and inbound notify processing
//!
//! ## Architecture Principles
//! - Only depends on `paybridge-common` and `paybridge-domain`
//! - Storage and credential exchange sit behind traits
//!   ([`KeyValueStore`], [`CredentialExchanger`])

pub mod cache_ports;
pub mod codec;
pub mod envelope;
mod errors;
pub mod notify;
pub mod signature;
pub mod token;

pub use cache_ports::KeyValueStore;
pub use codec::{SkippedField, XmlCodec, XmlEncoding, XmlOptions};
pub use envelope::ResponseEnvelope;
pub use notify::{NotifyAck, NotifyHandler, NotifyKind, NotifyProcessor};
pub use signature::{sign, sign_document, validate, verify, SignablePayload};
pub use token::{AccessTokenCache, CredentialExchanger};
