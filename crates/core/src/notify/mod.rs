//! Inbound payment notifications
//!
//! [`NotifyProcessor`] turns a raw callback body into a [`NotifyAck`]. It is
//! transport agnostic; `paybridge-infra` mounts it behind an axum router.

mod ack;
mod processor;

pub use ack::NotifyAck;
pub use processor::{NotifyHandler, NotifyKind, NotifyProcessor};
