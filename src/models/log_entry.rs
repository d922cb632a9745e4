//! A single NMEA sentence as shown in the browser log.

use serde::{Deserialize, Serialize};

/// Where a logged sentence came from.
///
/// The browser script styles each line with the CSS class `from-{source}`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentenceSource {
    /// Received by the UDP transport.
    Udp,
    /// Typed into the log page and sent over the websocket.
    Websocket,
}

/// Wire format of one websocket log frame: `{"sentence": ..., "source": ...}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub sentence: String,
    pub source: SentenceSource,
}

impl LogEntry {
    pub fn new(sentence: impl Into<String>, source: SentenceSource) -> Self {
        Self {
            sentence: sentence.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_like_the_browser_expects() {
        let entry = LogEntry::new("$GPGLL,4916.45,N,12311.12,W,225444,A*1D", SentenceSource::Udp);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["sentence"], "$GPGLL,4916.45,N,12311.12,W,225444,A*1D");
        assert_eq!(json["source"], "udp");
    }

    #[test]
    fn source_names_are_lowercase() {
        let names: Vec<String> = [SentenceSource::Udp, SentenceSource::Websocket]
            .iter()
            .map(|s| serde_json::to_string(s).unwrap())
            .collect();
        assert_eq!(names, ["\"udp\"", "\"websocket\""]);
    }
}
