use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use std::{fmt, io};
use thiserror::Error;

use crate::models::layout::{Layout, html_escape};

/// Failures of the bridge's network tasks.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("could not bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid udp target `{target}`: {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: io::Error,
    },
    #[error("outbound sentence channel closed")]
    ChannelClosed,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type BridgeResult<T> = Result<T, BridgeError>;

/// A lightweight wrapper for general errors that keeps the message local.
///
/// Errors carrying a [`Layout`] render as a regular HTML page; all others
/// render as JSON.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub layout: Option<Layout>,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            layout: None,
        }
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    /// Render this error as an HTML page wrapped in `layout`.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.layout {
            Some(layout) => {
                let title = self.status.canonical_reason().unwrap_or("Error");
                let body = format!(
                    "<h1>{}</h1><p>{}</p>",
                    html_escape(title),
                    html_escape(&self.message)
                );
                (self.status, Html(layout.wrap(&body))).into_response()
            }
            None => {
                let body = Json(json!({
                    "error": self.message,
                    "status": self.status.as_u16()
                }));

                (self.status, body).into_response()
            }
        }
    }
}
