//! Outbound HTTP: request description, TLS material and the dispatcher

pub mod dispatcher;
pub mod request;
mod tls;

pub use dispatcher::{PaymentSettings, TransportDispatcher, TransportDispatcherBuilder};
pub use request::{DispatchRequest, RequestBody};
