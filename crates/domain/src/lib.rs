//! # PayBridge Domain
//!
//! Core data model shared by every PayBridge crate.
//!
//! This crate contains:
//! - The dynamic document model ([`Document`], [`DocumentValue`])
//! - Credentials, token records and wire-level enums
//! - Domain error types and Result definitions
//! - Client configuration structures
//! - Protocol constants
//!
//! ## Architecture
//! - No dependencies on other PayBridge crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod value;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use value::{float_text, Document, DocumentValue};
