//! Domain types and models

pub mod credential;
pub mod token;
pub mod wire;

pub use credential::{ClientCertificate, Credential};
pub use token::{effective_ttl, CachedToken, TokenRecord};
pub use wire::{RequestMethod, SignType, TransportProfile, WireFormat};
