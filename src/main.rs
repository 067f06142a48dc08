//! Peer process: HTTP trigger surface plus the game supervision stack.

use anyhow::Result;
use clap::Parser;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tictactoe_peer::{
    router, AppState, ConnectionSupervisor, LocalBroker, SupervisorConfig, Synchronizer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for one peer.
#[derive(Debug, Parser)]
#[command(name = "tictactoe_peer", about = "Autonomous tic-tac-toe peer")]
struct Cli {
    /// Port for the local HTTP trigger API.
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Seconds between connection attempts.
    #[arg(long, default_value_t = 5)]
    retry_delay: u64,
    /// Thinking-time seconds before answering a move.
    #[arg(long, default_value_t = 3)]
    move_delay: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let synchronizer = Arc::new(Mutex::new(Synchronizer::new()));
    let config = SupervisorConfig::new(
        Duration::from_secs(cli.retry_delay),
        Duration::from_secs(cli.move_delay),
    );
    // In-process broker binding; a broker-backed Connector slots in here.
    let connector = Arc::new(LocalBroker::default());
    let supervisor = Arc::new(ConnectionSupervisor::new(
        connector,
        Arc::clone(&synchronizer),
        config,
    ));

    let app = router(AppState {
        supervisor,
        synchronizer,
    });

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", cli.port)).await?;
    info!(port = cli.port, "Peer ready at http://localhost:{}/", cli.port);
    info!("Trigger a game with GET /game/start?ip=<host>&port=<port>");

    axum::serve(listener, app).await?;

    Ok(())
}
