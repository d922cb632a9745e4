//! Defines routes of the bridge's web interface.
//!
//! ## Structure
//! - **Pages** (HTTP port)
//!   - `GET /`              — info page
//!   - `GET /config`        — configuration page
//!   - `GET /log`           — log viewer, only when the websocket log is enabled
//!   - anything else        — 404 page
//!
//! - **Assets**
//!   - `GET /style.css`
//!   - `GET /log_script.js`
//!
//! - **Log stream** (websocket port)
//!   - `GET /` — websocket upgrade

use crate::{
    handlers::{
        asset_handlers::{log_script, style},
        health_handlers::healthz,
        page_handlers::{config_page, info_page, log_page, not_found},
        ws_handlers::log_socket,
    },
    services::{log_hub::LogHub, page_service::PageService},
};
use axum::{Router, routing::get};

/// Build the router for pages and assets.
pub fn routes(pages: PageService) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(info_page))
        .route("/config", get(config_page))
        .route("/style.css", get(style))
        .route("/log_script.js", get(log_script));

    if pages.layout().websocket_log {
        router = router.route("/log", get(log_page));
    }

    router.fallback(not_found).with_state(pages)
}

/// Build the router served on the websocket port.
pub fn websocket_routes(hub: LogHub) -> Router {
    Router::new().route("/", get(log_socket)).with_state(hub)
}
