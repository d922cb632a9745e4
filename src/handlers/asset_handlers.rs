//! Stylesheet and browser script.

use crate::services::page_service::PageService;
use axum::{extract::State, http::header, response::IntoResponse};

/// `GET /style.css`
pub async fn style(State(pages): State<PageService>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], pages.style().to_string())
}

/// `GET /log_script.js`
pub async fn log_script(State(pages): State<PageService>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        pages.log_script().to_string(),
    )
}
