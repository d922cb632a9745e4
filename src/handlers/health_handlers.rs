//! Liveness handler.
//!
//! - GET /healthz  -> simple liveness with the websocket log flag

use crate::services::page_service::PageService;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// `GET /healthz`
///
/// Always returns 200 OK; never performs I/O.
pub async fn healthz(State(pages): State<PageService>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".into(),
            websocket_log: pages.layout().websocket_log,
        }),
    )
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    websocket_log: bool,
}
