//! Fan-out of logged sentences to every connected log page, plus the queue
//! of sentences typed into those pages.

use tokio::sync::{broadcast, mpsc};
use tracing::debug;

use crate::{
    errors::{BridgeError, BridgeResult},
    models::log_entry::{LogEntry, SentenceSource},
};

/// Entries buffered per subscriber before it starts lagging.
pub const LOG_CAPACITY: usize = 64;

/// Sentences queued for the transport before senders wait.
pub const OUTBOUND_CAPACITY: usize = 32;

#[derive(Clone, Debug)]
pub struct LogHub {
    entries: broadcast::Sender<LogEntry>,
    outbound: mpsc::Sender<String>,
}

impl LogHub {
    /// Create a hub together with the receiving end of the outbound queue.
    pub fn new() -> (Self, mpsc::Receiver<String>) {
        let (entries, _) = broadcast::channel(LOG_CAPACITY);
        let (outbound, outbound_rx) = mpsc::channel(OUTBOUND_CAPACITY);
        (Self { entries, outbound }, outbound_rx)
    }

    /// Send an entry to every current subscriber.
    ///
    /// Returns the number of subscribers reached; zero is not an error.
    pub fn publish(&self, entry: LogEntry) -> usize {
        debug!(source = ?entry.source, sentence = %entry.sentence, "log entry");
        self.entries.send(entry).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.entries.subscribe()
    }

    /// Queue a sentence typed into a log page for the transport and echo it
    /// to all log pages.
    pub async fn send_sentence(&self, sentence: String) -> BridgeResult<()> {
        self.outbound
            .send(sentence.clone())
            .await
            .map_err(|_| BridgeError::ChannelClosed)?;
        self.publish(LogEntry::new(sentence, SentenceSource::Websocket));
        Ok(())
    }
}
