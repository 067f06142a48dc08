//! Transport seam between the supervisor and the pub/sub broker.
//!
//! The broker binding itself (wire encoding, broker protocol) lives outside
//! this crate; the supervisor talks to it through [`Connector`] and
//! [`MoveSink`]. [`LocalBroker`] is the in-process reference implementation
//! used by the tests and the peer binary's default wiring.

use crate::game::MoveEvent;
use async_trait::async_trait;
use derive_more::{Display, Error};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument, warn};

/// Transport error with caller location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", message, file, line)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Outbound half of a connected move channel.
#[async_trait]
pub trait MoveSink: Send + Sync {
    /// Publishes a move to the shared moves topic.
    async fn publish(&self, event: &MoveEvent) -> Result<(), TransportError>;
}

/// Inbound half of a connected move channel.
pub type MoveStream = mpsc::Receiver<MoveEvent>;

/// Builds a connected channel from a channel URL.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Attempts to connect to the broker at `url`.
    ///
    /// On success returns the publishing sink and the subscription stream of
    /// the shared moves topic. The stream ends when the connection drops.
    async fn connect(&self, url: &str) -> Result<(Box<dyn MoveSink>, MoveStream), TransportError>;
}

/// In-process pub/sub broker over a tokio broadcast channel.
///
/// Every subscriber receives every published move, including the publisher's
/// own echo, matching the shared broadcast-topic semantics of the real
/// broker.
#[derive(Debug, Clone)]
pub struct LocalBroker {
    topic: broadcast::Sender<MoveEvent>,
}

impl LocalBroker {
    /// Creates a broker with the given topic capacity.
    pub fn new(capacity: usize) -> Self {
        let (topic, _) = broadcast::channel(capacity);
        Self { topic }
    }
}

impl Default for LocalBroker {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl Connector for LocalBroker {
    #[instrument(skip(self))]
    async fn connect(&self, url: &str) -> Result<(Box<dyn MoveSink>, MoveStream), TransportError> {
        debug!(url, "Connecting to local broker");
        let mut subscription = self.topic.subscribe();
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            loop {
                match subscription.recv().await {
                    Ok(event) => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Subscription lagged, moves dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        let sink = LocalSink {
            topic: self.topic.clone(),
        };
        Ok((Box::new(sink), rx))
    }
}

/// Publishing handle onto a [`LocalBroker`] topic.
struct LocalSink {
    topic: broadcast::Sender<MoveEvent>,
}

#[async_trait]
impl MoveSink for LocalSink {
    async fn publish(&self, event: &MoveEvent) -> Result<(), TransportError> {
        self.topic
            .send(event.clone())
            .map(|_| ())
            .map_err(|_| TransportError::new("Moves topic has no subscribers"))
    }
}
