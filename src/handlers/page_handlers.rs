//! HTML page handlers.
//!
//! - GET /        -> info page
//! - GET /config  -> configuration page
//! - GET /log     -> log viewer (404 when the websocket log is disabled)
//! - anything else -> layout-wrapped 404 page

use crate::{
    errors::AppError,
    services::page_service::{Page, PageService},
};
use axum::{
    extract::State,
    http::Uri,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

/// `GET /`
pub async fn info_page(State(pages): State<PageService>) -> Result<impl IntoResponse, AppError> {
    render(&pages, Page::Info)
}

/// `GET /config`
pub async fn config_page(State(pages): State<PageService>) -> Result<impl IntoResponse, AppError> {
    render(&pages, Page::Config)
}

/// `GET /log`
pub async fn log_page(State(pages): State<PageService>) -> Result<impl IntoResponse, AppError> {
    render(&pages, Page::Log)
}

/// Fallback for unknown paths.
pub async fn not_found(State(pages): State<PageService>, uri: Uri) -> AppError {
    AppError::not_found(format!("No page at {}", uri.path())).with_layout(pages.layout())
}

fn render(pages: &PageService, page: Page) -> Result<Html<String>, AppError> {
    pages
        .page(page)
        .map(|html: Arc<str>| Html(html.to_string()))
        .ok_or_else(|| {
            AppError::not_found(format!("{:?} page is disabled", page)).with_layout(pages.layout())
        })
}
