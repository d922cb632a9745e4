//! Websocket log stream consumed by `/log_script.js`.
//!
//! Every hub entry is pushed as a JSON text frame. Text frames from the
//! browser carry one sentence terminated by `\r\n`.

use crate::{
    errors::BridgeResult,
    models::log_entry::LogEntry,
    services::log_hub::LogHub,
};
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

/// `GET /` on the websocket port.
pub async fn log_socket(State(hub): State<LogHub>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| async move {
        info!("log client connected");
        if let Err(err) = session(socket, hub).await {
            warn!("log session ended with error: {}", err);
        }
        info!("log client disconnected");
    })
}

async fn session(socket: WebSocket, hub: LogHub) -> BridgeResult<()> {
    let (mut sink, mut stream) = socket.split();
    let mut entries = hub.subscribe();

    loop {
        tokio::select! {
            entry = entries.recv() => match entry {
                Ok(entry) => {
                    if sink.send(Message::Text(encode(&entry)?.into())).await.is_err() {
                        return Ok(());
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("log client lagging, skipped {} entries", skipped);
                }
                Err(RecvError::Closed) => return Ok(()),
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if let Some(sentence) = inbound_sentence(text.as_str()) {
                        hub.send_sentence(sentence).await?;
                    }
                }
                Some(Ok(Message::Close(_))) | None => return Ok(()),
                Some(Ok(other)) => debug!("ignoring websocket frame {:?}", other),
                Some(Err(err)) => {
                    debug!("websocket error: {}", err);
                    return Ok(());
                }
            },
        }
    }
}

fn encode(entry: &LogEntry) -> BridgeResult<String> {
    Ok(serde_json::to_string(entry)?)
}

/// Strip the line terminator the browser appends; blank input is ignored.
pub fn inbound_sentence(text: &str) -> Option<String> {
    let sentence = text.trim_end_matches(['\r', '\n']);
    if sentence.trim().is_empty() {
        None
    } else {
        Some(sentence.to_string())
    }
}
