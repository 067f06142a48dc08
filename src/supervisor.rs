//! Connection supervision: connect, seed a game, relay moves, reconnect.

use crate::game::MoveEvent;
use crate::session::Synchronizer;
use crate::transport::{Connector, MoveSink, MoveStream};
use derive_getters::Getters;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Channel URL template; host and port come from the start trigger.
const WS_URL_PATTERN: &str = "ws://{host}:{port}/game";

/// Tuning knobs for the supervision loop.
#[derive(Debug, Clone, Copy, Getters)]
pub struct SupervisorConfig {
    /// Fixed delay between connection attempts. Unbounded retries, no
    /// backoff, no jitter.
    retry_delay: Duration,
    /// Thinking-time delay applied before answering an inbound move.
    move_delay: Duration,
}

impl SupervisorConfig {
    /// Creates a config with explicit delays. Tests pass zero for both.
    pub fn new(retry_delay: Duration, move_delay: Duration) -> Self {
        Self {
            retry_delay,
            move_delay,
        }
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(5),
            move_delay: Duration::from_secs(3),
        }
    }
}

/// Owns the outbound link to the message channel.
///
/// On a successful connection the supervisor seeds a brand-new local game and
/// publishes its first move; every inbound move is answered through the
/// synchronizer. Connection establishment failures retry forever on the
/// configured fixed delay.
pub struct ConnectionSupervisor {
    connector: Arc<dyn Connector>,
    synchronizer: Arc<Mutex<Synchronizer>>,
    config: SupervisorConfig,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectionSupervisor {
    /// Creates a supervisor over the given connector and synchronizer.
    pub fn new(
        connector: Arc<dyn Connector>,
        synchronizer: Arc<Mutex<Synchronizer>>,
        config: SupervisorConfig,
    ) -> Self {
        Self {
            connector,
            synchronizer,
            config,
            task: Mutex::new(None),
        }
    }

    /// Builds the channel URL and starts the supervision task.
    ///
    /// Any previous link is dropped first; the call returns immediately and
    /// connection failures are handled by the retry loop, never surfaced.
    #[instrument(skip(self))]
    pub fn start(&self, host: &str, port: u16) {
        let url = WS_URL_PATTERN
            .replace("{host}", host)
            .replace("{port}", &port.to_string());
        info!(url = %url, "Starting connection supervisor");
        self.disconnect();
        let handle = tokio::spawn(run(
            Arc::clone(&self.connector),
            Arc::clone(&self.synchronizer),
            self.config,
            url,
        ));
        *self.task.lock().unwrap() = Some(handle);
    }

    /// Drops the link. No-op when already disconnected or never connected.
    #[instrument(skip(self))]
    pub fn disconnect(&self) {
        if let Some(handle) = self.task.lock().unwrap().take() {
            info!("Disconnecting");
            handle.abort();
        }
    }
}

impl Drop for ConnectionSupervisor {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Supervision loop: connect with unbounded fixed-delay retries, then relay
/// moves until the connection drops.
async fn run(
    connector: Arc<dyn Connector>,
    synchronizer: Arc<Mutex<Synchronizer>>,
    config: SupervisorConfig,
    url: String,
) {
    let mut first_attempt = true;
    loop {
        if !first_attempt {
            tokio::time::sleep(config.retry_delay).await;
        }
        first_attempt = false;

        let (sink, stream) = match connector.connect(&url).await {
            Ok(connection) => connection,
            Err(e) => {
                error!(url = %url, error = %e, "Couldn't establish connection, will retry");
                continue;
            }
        };
        info!(url = %url, "Connected to moves topic");

        // Self-initiated game: seed and play first.
        let opening = synchronizer.lock().unwrap().opening_move();
        if let Err(e) = sink.publish(&opening).await {
            error!(error = %e, "Failed to publish opening move");
        }

        relay(sink.as_ref(), stream, &synchronizer, &config).await;
        warn!(url = %url, "Connection lost, trying to reconnect");
    }
}

/// Handles inbound moves one at a time until the stream closes.
async fn relay(
    sink: &dyn MoveSink,
    mut stream: MoveStream,
    synchronizer: &Mutex<Synchronizer>,
    config: &SupervisorConfig,
) {
    while let Some(event) = stream.recv().await {
        if is_own_echo(synchronizer, &event) {
            debug!(game_id = %event.game_id, "Skipping echo of own move");
            continue;
        }
        tokio::time::sleep(config.move_delay).await;
        let reply = {
            let mut sync = synchronizer.lock().unwrap();
            sync.ensure_session(&event);
            sync.apply_and_respond(&event)
        };
        // A failed send is logged and not retried at the message level.
        if let Err(e) = sink.publish(&reply).await {
            error!(error = %e, "Failed to publish reply move");
        }
    }
}

/// The shared topic broadcasts every move back to its sender; inbound events
/// carrying the local player's id are skipped before touching the session.
fn is_own_echo(synchronizer: &Mutex<Synchronizer>, event: &MoveEvent) -> bool {
    synchronizer
        .lock()
        .unwrap()
        .local_player()
        .is_some_and(|local| local.id == event.player.id)
}
