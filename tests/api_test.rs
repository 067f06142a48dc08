//! Tests for the HTTP trigger layer.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tictactoe_peer::{
    router, AppState, ConnectionSupervisor, LocalBroker, SupervisorConfig, Synchronizer,
};
use tower::ServiceExt;

fn test_state() -> AppState {
    let synchronizer = Arc::new(Mutex::new(Synchronizer::new()));
    let supervisor = Arc::new(ConnectionSupervisor::new(
        Arc::new(LocalBroker::default()),
        Arc::clone(&synchronizer),
        SupervisorConfig::new(Duration::ZERO, Duration::ZERO),
    ));
    AppState {
        supervisor,
        synchronizer,
    }
}

#[tokio::test]
async fn test_state_is_null_before_any_game() {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/game/state")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"null");
}

#[tokio::test]
async fn test_start_always_answers_ok() {
    let app = router(test_state());

    // The peer at this address does not exist; establishment failures are
    // retried in the background, never surfaced to the caller.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/game/start?ip=localhost&port=9090")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_state_reflects_live_session() {
    let state = test_state();
    let app = router(state.clone());

    // Seed a game directly through the synchronizer.
    state.synchronizer.lock().unwrap().opening_move();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/game/state")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let session: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(session["gameId"].is_string());
    assert_eq!(session["ended"], serde_json::Value::Bool(false));
    assert_eq!(session["player1"]["mark"], "X");
}

#[tokio::test]
async fn test_missing_start_params_are_rejected() {
    let app = router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/game/start")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
