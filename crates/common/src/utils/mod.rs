//! Common utility functions
//!
//! - **[`nonce`]**: nonce strings and timestamps for signed requests

pub mod nonce;

pub use nonce::{nonce_str, timestamp_secs};
