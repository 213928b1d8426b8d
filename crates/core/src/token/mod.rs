//! Access-token cache with per-key single-flight refresh

pub mod ports;
pub mod service;

pub use ports::CredentialExchanger;
pub use service::AccessTokenCache;
