//! axum routes for the three callback families
//!
//! | Route | Kind |
//! |-------|------|
//! | `POST /paid` | [`NotifyKind::Paid`] |
//! | `POST /refunded` | [`NotifyKind::Refunded`] |
//! | `POST /scanned` | [`NotifyKind::Scanned`] |
//!
//! Every request is answered `200` with an XML acknowledgement, including
//! ones that fail verification. Nest the router under any prefix.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use paybridge_core::{NotifyKind, NotifyProcessor};
use paybridge_domain::WireFormat;
use tracing::debug;

/// Router for the notify endpoints, backed by `processor`.
pub fn notify_router(processor: Arc<NotifyProcessor>) -> Router {
    Router::new()
        .route("/paid", post(paid))
        .route("/refunded", post(refunded))
        .route("/scanned", post(scanned))
        .with_state(processor)
}

async fn paid(State(processor): State<Arc<NotifyProcessor>>, body: Bytes) -> impl IntoResponse {
    acknowledge(&processor, NotifyKind::Paid, &body).await
}

async fn refunded(State(processor): State<Arc<NotifyProcessor>>, body: Bytes) -> impl IntoResponse {
    acknowledge(&processor, NotifyKind::Refunded, &body).await
}

async fn scanned(State(processor): State<Arc<NotifyProcessor>>, body: Bytes) -> impl IntoResponse {
    acknowledge(&processor, NotifyKind::Scanned, &body).await
}

async fn acknowledge(processor: &NotifyProcessor, kind: NotifyKind, body: &[u8]) -> impl IntoResponse {
    debug!(kind = %kind, bytes = body.len(), "Received notification");
    let ack = processor.process(kind, body).await;
    (StatusCode::OK, [(header::CONTENT_TYPE, WireFormat::Xml.content_type())], ack.to_xml())
}
