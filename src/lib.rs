//! Autonomous peer-to-peer tic-tac-toe over a pub/sub move channel.
//!
//! Two independent processes each run this crate and play against each other
//! with no coordinator: marks are assigned from the first move exchanged, a
//! new game is detected from an unrecognized game id, and a dropped channel
//! is re-established by the supervisor's retry loop.
//!
//! # Architecture
//!
//! - **Game**: board, outcome evaluation and the win/block/random heuristic
//! - **Session**: the live game session and the turn-taking synchronizer
//! - **Transport**: the pub/sub channel seam and an in-process broker
//! - **Supervisor**: connect, seed a game, relay moves, reconnect
//! - **Api**: thin HTTP surface to trigger a connection and read state

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod game;
mod session;
mod supervisor;
mod transport;

// Crate-level exports - HTTP layer
pub use api::{router, AppState, StartParams};

// Crate-level exports - Game types
pub use game::{heuristic, rules, Board, Mark, MoveEvent, Player};

// Crate-level exports - Session management
pub use session::{GameSession, Synchronizer};

// Crate-level exports - Supervision
pub use supervisor::{ConnectionSupervisor, SupervisorConfig};

// Crate-level exports - Transport seam
pub use transport::{Connector, LocalBroker, MoveSink, MoveStream, TransportError};
