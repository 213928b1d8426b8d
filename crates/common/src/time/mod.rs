//! Time utilities and abstractions
//!
//! - **[`clock`]**: real and mock clocks used by TTL-based code
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use paybridge_common::time::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(clock.now() - start, Duration::from_secs(5));
//! ```

pub mod clock;

pub use clock::{Clock, MockClock, SystemClock};
