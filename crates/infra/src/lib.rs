//! # PayBridge Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-based transport dispatcher (insecure and mutual-TLS)
//! - An in-memory key-value store for the token cache
//! - The HTTP credential exchanger
//! - Environment configuration loading
//! - The axum notify router and the [`PlatformClient`] facade
//!
//! ## Architecture
//! - Implements traits defined in `paybridge-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod notify;
pub mod token;

// Re-export commonly used items
pub use cache::MemoryStore;
pub use client::PlatformClient;
pub use errors::InfraError;
pub use http::{DispatchRequest, PaymentSettings, RequestBody, TransportDispatcher};
pub use notify::notify_router;
pub use token::HttpCredentialExchanger;
