//! Error type for the utility layers
//!
//! Digests, block ciphers and caches report failures as [`CommonError`]. It
//! has no knowledge of the SDK's domain error; `paybridge-core` maps it at the
//! boundary.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `Crypto` | key length, padding and block alignment failures |
//! | `Serialization` | byte/text conversions in helpers |
//! | `Validation` | input constraint violations |
//! | `Internal` | invariant violations |
//!
//! ```rust
//! use paybridge_common::error::CommonError;
//!
//! let err = CommonError::crypto("AES-256-ECB", "ciphertext is not block aligned");
//! assert_eq!(err.to_string(), "Crypto error (AES-256-ECB): ciphertext is not block aligned");
//! ```

use std::fmt;

/// Standard result type using CommonError
pub type CommonResult<T> = Result<T, CommonError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// Key, padding or ciphertext errors from a cryptographic primitive
    Crypto { algorithm: String, message: String },

    Serialization { message: String, format: Option<String> },

    Validation { field: String, message: String },

    /// Internal errors that shouldn't normally occur
    Internal { message: String },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crypto { algorithm, message } => write!(f, "Crypto error ({algorithm}): {message}"),
            Self::Serialization { message, format: Some(format) } => {
                write!(f, "Serialization error ({format}): {message}")
            }
            Self::Serialization { message, format: None } => write!(f, "Serialization error: {message}"),
            Self::Validation { field, message } => write!(f, "Validation error for field '{field}': {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for CommonError {}

impl CommonError {
    pub fn crypto<A: Into<String>, S: Into<String>>(algorithm: A, message: S) -> Self {
        Self::Crypto { algorithm: algorithm.into(), message: message.into() }
    }

    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization { message: message.into(), format: None }
    }

    pub fn serialization_format<S: Into<String>, F: Into<String>>(format: F, message: S) -> Self {
        Self::Serialization { message: message.into(), format: Some(format.into()) }
    }

    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Short variant name for structured log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Crypto { .. } => "crypto",
            Self::Serialization { .. } => "serialization",
            Self::Validation { .. } => "validation",
            Self::Internal { .. } => "internal",
        }
    }
}
