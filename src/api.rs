//! Thin HTTP layer: trigger a connection, read the live session.

use crate::session::{GameSession, Synchronizer};
use crate::supervisor::ConnectionSupervisor;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};

/// Shared state behind the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Supervisor owning the outbound channel.
    pub supervisor: Arc<ConnectionSupervisor>,
    /// Synchronizer owning the live session, shared with the supervisor.
    pub synchronizer: Arc<Mutex<Synchronizer>>,
}

/// Query parameters of the start trigger.
#[derive(Debug, Deserialize)]
pub struct StartParams {
    /// Remote peer host.
    pub ip: String,
    /// Remote peer port.
    pub port: u16,
}

/// Builds the `/game` router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/game/start", get(start))
        .route("/game/state", get(game_state))
        .with_state(state)
}

/// Triggers a connection to the remote peer.
///
/// Always answers 200; establishment failures are retried in the background
/// and never surfaced to the caller.
#[instrument(skip(state))]
async fn start(State(state): State<AppState>, Query(params): Query<StartParams>) {
    info!(ip = %params.ip, port = params.port, "Start requested");
    state.supervisor.start(&params.ip, params.port);
}

/// Returns a read-only snapshot of the live session, or `null` when no game
/// has started.
#[instrument(skip(state))]
async fn game_state(State(state): State<AppState>) -> Json<Option<GameSession>> {
    let snapshot = state.synchronizer.lock().unwrap().snapshot();
    Json(snapshot)
}
