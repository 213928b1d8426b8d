//! HTTP endpoints for inbound platform notifications

pub mod router;

pub use router::notify_router;
