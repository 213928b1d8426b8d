//! Error types used throughout the SDK

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for PayBridge
///
/// Codec and crypto failures are returned to the immediate caller and are
/// never retried by the SDK. Transport failures travel inside a
/// `ResponseEnvelope` instead of being raised.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PayBridgeError {
    /// Malformed or unsupported value while encoding or decoding a wire body
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Inbound signature did not match; the whole payload is untrusted
    #[error("Signature mismatch: {0}")]
    SignatureMismatch(String),

    /// Bad key length, bad padding or malformed ciphertext
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Network or TLS failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Certificate or CA material missing or unreadable for mutual TLS
    #[error("Fatal configuration error: {0}")]
    ConfigurationFatal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential exchange rejected by the identity endpoint
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PayBridgeError {
    /// Only transport failures are worth retrying, and only by the caller.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Errors that must stop the affected profile or client from starting.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::ConfigurationFatal(_))
    }
}

/// Result type alias for PayBridge operations
pub type Result<T> = std::result::Result<T, PayBridgeError>;
