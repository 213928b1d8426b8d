//! Conversions from utility-layer errors into the domain error.

use paybridge_common::CommonError;
use paybridge_domain::PayBridgeError;

/// Maps [`CommonError`] into [`PayBridgeError`] at the core boundary.
pub(crate) trait IntoPayBridgeError {
    fn into_paybridge(self) -> PayBridgeError;
}

impl IntoPayBridgeError for CommonError {
    fn into_paybridge(self) -> PayBridgeError {
        let message = self.to_string();
        match self {
            Self::Crypto { .. } => PayBridgeError::Crypto(message),
            Self::Serialization { .. } => PayBridgeError::Encoding(message),
            Self::Validation { .. } => PayBridgeError::InvalidInput(message),
            Self::Internal { .. } => PayBridgeError::Internal(message),
        }
    }
}
