//! Credential exchange against the platform's identity endpoint

pub mod exchanger;

pub use exchanger::HttpCredentialExchanger;
