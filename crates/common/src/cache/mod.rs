//! In-process cache with per-entry expiration
//!
//! Backs the in-memory token store. Entries carry their own deadline, so a
//! single cache can hold tokens with different lifetimes. Time comes from a
//! [`Clock`](crate::time::Clock), so expiry is testable with `MockClock`.
//!
//! # Example
//! ```
//! use std::time::Duration;
//!
//! use paybridge_common::cache::Cache;
//!
//! let cache: Cache<String, String> = Cache::new();
//! cache.insert_with_ttl("token".to_string(), "abc".to_string(), Duration::from_secs(6700));
//! assert!(cache.contains_key(&"token".to_string()));
//! ```

mod core;

pub use self::core::Cache;
