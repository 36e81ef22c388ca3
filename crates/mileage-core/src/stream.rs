//! Transcript event stream.
//!
//! A speech engine emits [`TranscriptEvent`]s as recognition progresses. A
//! [`TranscriptSubscriber`] parses each one and publishes a [`FillUpUpdate`]
//! downstream:
//!
//! ```text
//! speech engine ──TranscriptEvent──▶ TranscriptSubscriber ──FillUpUpdate──▶ form
//! ```
//!
//! Every update is computed from the event's full transcript alone; nothing
//! carries over between events.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::StreamError;
use crate::models::fillup::ParsedFillUp;
use crate::transcript::TranscriptParser;

/// A transcript update from the speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// Best transcription so far; more audio is coming.
    Partial(String),
    /// Final transcription; the engine has stopped.
    Final(String),
}

impl TranscriptEvent {
    pub fn transcript(&self) -> &str {
        match self {
            TranscriptEvent::Partial(text) | TranscriptEvent::Final(text) => text,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, TranscriptEvent::Final(_))
    }
}

/// Parsed fields for one transcript event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillUpUpdate {
    /// Transcript the fields were parsed from.
    pub transcript: String,
    /// Parsed fields.
    pub fill_up: ParsedFillUp,
    /// Whether this is the last update of the stream.
    pub is_final: bool,
}

/// Parses transcript events and publishes the results.
pub struct TranscriptSubscriber<P> {
    parser: P,
    skip_unchanged: bool,
}

impl<P: TranscriptParser> TranscriptSubscriber<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            skip_unchanged: false,
        }
    }

    /// Do not publish partial updates whose fields equal the previous update.
    ///
    /// The final update is always published.
    pub fn skip_unchanged(mut self, skip: bool) -> Self {
        self.skip_unchanged = skip;
        self
    }

    /// Parse one event into an update.
    pub fn handle(&self, event: &TranscriptEvent) -> FillUpUpdate {
        FillUpUpdate {
            transcript: event.transcript().to_string(),
            fill_up: self.parser.parse(event.transcript()),
            is_final: event.is_final(),
        }
    }

    /// Consume events until a final event arrives or the sender goes away.
    ///
    /// Returns the last parsed fields, or `None` when no event arrived.
    pub async fn run(
        self,
        mut events: mpsc::Receiver<TranscriptEvent>,
        updates: mpsc::Sender<FillUpUpdate>,
    ) -> Result<Option<ParsedFillUp>, StreamError> {
        let mut last: Option<ParsedFillUp> = None;
        let mut published = 0usize;

        while let Some(event) = events.recv().await {
            let update = self.handle(&event);
            let is_final = update.is_final;

            let unchanged = last.as_ref() == Some(&update.fill_up);
            last = Some(update.fill_up.clone());

            if self.skip_unchanged && unchanged && !is_final {
                debug!("Skipping unchanged partial update");
                continue;
            }

            if updates.send(update).await.is_err() {
                warn!("Update receiver dropped after {} updates", published);
                return Err(StreamError::Closed);
            }
            published += 1;

            if is_final {
                break;
            }
        }

        info!(
            "Transcript stream finished with {} updates ({})",
            published,
            self.parser.name()
        );

        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TokenScanParser;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    async fn drain(mut rx: mpsc::Receiver<FillUpUpdate>) -> Vec<FillUpUpdate> {
        let mut out = Vec::new();
        while let Some(update) = rx.recv().await {
            out.push(update);
        }
        out
    }

    #[tokio::test]
    async fn test_publishes_each_event() {
        let (event_tx, event_rx) = mpsc::channel(8);
        let (update_tx, update_rx) = mpsc::channel(8);

        for event in [
            TranscriptEvent::Partial("54 liters".to_string()),
            TranscriptEvent::Partial("54 liters in vernon".to_string()),
            TranscriptEvent::Final("54 liters in vernon $78".to_string()),
        ] {
            event_tx.send(event).await.unwrap();
        }

        let last = TranscriptSubscriber::new(TokenScanParser::new())
            .run(event_rx, update_tx)
            .await
            .unwrap()
            .unwrap();

        let updates = drain(update_rx).await;
        assert_eq!(updates.len(), 3);
        assert!(!updates[0].is_final);
        assert_eq!(updates[1].fill_up.location, "Vernon");
        assert!(updates[2].is_final);
        assert_eq!(updates[2].fill_up, last);
        assert_eq!(last.amount, Some(Decimal::new(78, 0)));
    }

    #[tokio::test]
    async fn test_stops_after_final() {
        let (event_tx, event_rx) = mpsc::channel(8);
        let (update_tx, update_rx) = mpsc::channel(8);

        event_tx
            .send(TranscriptEvent::Final("$10".to_string()))
            .await
            .unwrap();
        event_tx
            .send(TranscriptEvent::Partial("$99".to_string()))
            .await
            .unwrap();

        let last = TranscriptSubscriber::new(TokenScanParser::new())
            .run(event_rx, update_tx)
            .await
            .unwrap();

        assert_eq!(last.unwrap().amount, Some(Decimal::new(10, 0)));
        assert_eq!(drain(update_rx).await.len(), 1);
    }

    #[tokio::test]
    async fn test_skip_unchanged_partials() {
        let (event_tx, event_rx) = mpsc::channel(8);
        let (update_tx, update_rx) = mpsc::channel(8);

        for event in [
            TranscriptEvent::Partial("54 liters".to_string()),
            TranscriptEvent::Partial("54 liters and".to_string()),
            TranscriptEvent::Final("54 liters and".to_string()),
        ] {
            event_tx.send(event).await.unwrap();
        }

        TranscriptSubscriber::new(TokenScanParser::new())
            .skip_unchanged(true)
            .run(event_rx, update_tx)
            .await
            .unwrap();

        let updates = drain(update_rx).await;
        assert_eq!(updates.len(), 2);
        assert!(updates[1].is_final);
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let (event_tx, event_rx) = mpsc::channel::<TranscriptEvent>(1);
        let (update_tx, _update_rx) = mpsc::channel(1);
        drop(event_tx);

        let last = TranscriptSubscriber::new(TokenScanParser::new())
            .run(event_rx, update_tx)
            .await
            .unwrap();
        assert_eq!(last, None);
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_reported() {
        let (event_tx, event_rx) = mpsc::channel(1);
        let (update_tx, update_rx) = mpsc::channel(1);
        drop(update_rx);

        event_tx
            .send(TranscriptEvent::Partial("54 l".to_string()))
            .await
            .unwrap();

        let result = TranscriptSubscriber::new(TokenScanParser::new())
            .run(event_rx, update_tx)
            .await;
        assert_eq!(result, Err(StreamError::Closed));
    }
}
