//! NMEA 0183 over UDP.
//!
//! Datagrams received on the bound socket are published to the log hub line
//! by line. Sentences typed into a log page are forwarded to an optional
//! target address.

use std::{io, net::SocketAddr};
use tokio::{
    net::{UdpSocket, lookup_host},
    sync::mpsc,
};
use tracing::{debug, warn};

use crate::{
    errors::{BridgeError, BridgeResult},
    models::log_entry::{LogEntry, SentenceSource},
    services::log_hub::LogHub,
};

/// One Ethernet MTU; large enough for several batched sentences.
const RECV_BUFFER_LEN: usize = 1500;

pub struct UdpTransport {
    socket: UdpSocket,
    target: Option<SocketAddr>,
}

impl UdpTransport {
    /// Bind `addr` and resolve the optional forwarding target.
    pub async fn bind(addr: &str, target: Option<&str>) -> BridgeResult<Self> {
        let socket = UdpSocket::bind(addr).await.map_err(|source| BridgeError::Bind {
            addr: addr.to_string(),
            source,
        })?;

        let target = match target {
            Some(target) => Some(resolve_target(target).await?),
            None => None,
        };

        Ok(Self { socket, target })
    }

    pub fn local_addr(&self) -> BridgeResult<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Pump datagrams into `hub` and `outbound` sentences to the target until
    /// the outbound queue closes. I/O errors on single datagrams are logged
    /// and skipped.
    pub async fn run(self, hub: LogHub, mut outbound: mpsc::Receiver<String>) -> BridgeResult<()> {
        let mut buf = vec![0u8; RECV_BUFFER_LEN];
        loop {
            tokio::select! {
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok((len, peer)) => match split_datagram(&buf[..len]) {
                        Some(sentences) => {
                            for sentence in sentences {
                                hub.publish(LogEntry::new(sentence, SentenceSource::Udp));
                            }
                        }
                        None => warn!("dropping non-ASCII datagram from {}", peer),
                    },
                    Err(err) => warn!("udp receive failed: {}", err),
                },
                sentence = outbound.recv() => {
                    let Some(sentence) = sentence else {
                        return Err(BridgeError::ChannelClosed);
                    };
                    self.forward(&sentence).await;
                }
            }
        }
    }

    async fn forward(&self, sentence: &str) {
        let Some(target) = self.target else {
            debug!("no udp target configured, dropping `{}`", sentence);
            return;
        };
        let line = format!("{}\r\n", sentence);
        match self.socket.send_to(line.as_bytes(), target).await {
            Ok(_) => debug!("forwarded `{}` to {}", sentence, target),
            Err(err) => warn!("could not forward `{}` to {}: {}", sentence, target, err),
        }
    }
}

async fn resolve_target(target: &str) -> BridgeResult<SocketAddr> {
    let invalid = |source: io::Error| BridgeError::InvalidTarget {
        target: target.to_string(),
        source,
    };
    lookup_host(target)
        .await
        .map_err(invalid)?
        .next()
        .ok_or_else(|| invalid(io::Error::new(io::ErrorKind::NotFound, "no addresses found")))
}

/// Split a datagram into its non-empty lines.
///
/// Returns `None` when the payload is not ASCII, which NMEA 0183 requires.
pub fn split_datagram(payload: &[u8]) -> Option<Vec<String>> {
    if !payload.is_ascii() {
        return None;
    }
    let text = std::str::from_utf8(payload).ok()?;
    Some(
        text.split(['\r', '\n'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
