//! Polling against a local agent stand-in: failures keep the last good
//! snapshot and raise the error flag until the next success.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use twintop::app::App;
use twintop::error::FetchError;
use twintop::poller::{spawn_poller, MetricsClient, PollOutcome};

fn metrics_body(cpu: f64) -> Value {
    json!({
        "timestamp": "2024-01-01T00:00:00+00:00",
        "cpu": {"percent": cpu, "frequency": 2400.0, "frequency_max": 3600.0, "cores": 8, "temperature": null},
        "memory": {"percent": 70.0, "used": 11.2, "total": 16.0, "available": 4.8},
        "disk": {"percent": 50.0, "used": 250.0, "total": 500.0, "free": 250.0},
        "battery": {"percent": 15.0, "plugged": false, "time_left": 1200},
        "network": {"bytes_sent": 1, "bytes_recv": 2, "packets_sent": 3, "packets_recv": 4},
        "process_count": 120
    })
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    addr
}

// Fails the first request with a 500 that still carries a well-formed body,
// then answers normally.
async fn flaky_agent() -> SocketAddr {
    async fn metrics(State(hits): State<Arc<AtomicUsize>>) -> (StatusCode, Json<Value>) {
        if hits.fetch_add(1, Ordering::SeqCst) == 0 {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(metrics_body(99.0)))
        } else {
            (StatusCode::OK, Json(metrics_body(45.0)))
        }
    }
    serve(
        Router::new()
            .route("/api/metrics", get(metrics))
            .with_state(Arc::new(AtomicUsize::new(0))),
    )
    .await
}

fn base(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

#[tokio::test]
async fn server_error_counts_as_failure() {
    let addr = flaky_agent().await;
    let client = MetricsClient::new(&base(addr)).unwrap();

    let err = client.fetch().await.unwrap_err();
    assert!(
        matches!(err, FetchError::Status(s) if s.as_u16() == 500),
        "{err:?}"
    );
    let ok = client.fetch().await.unwrap();
    assert_eq!(ok.cpu_percent, 45.0);
    assert_eq!(ok.process_count, 120);
    assert!(!ok.battery_plugged);
}

#[tokio::test]
async fn failure_keeps_last_snapshot() {
    let addr = flaky_agent().await;
    let client = MetricsClient::new(&base(addr)).unwrap();
    let mut app = App::with_rng(&base(addr), true, StdRng::seed_from_u64(9));

    // Seed a known-good snapshot first
    let good = twintop::types::MetricsSnapshot::from_json(metrics_body(30.0).to_string().as_bytes())
        .unwrap();
    app.handle_poll_at(PollOutcome::Snapshot(good), 0.0);
    assert!(!app.fetch_error());

    app.handle_poll_at(client.fetch().await.into(), 100.0);
    assert!(app.fetch_error());
    assert_eq!(app.last_snapshot(), Some(&good));

    app.handle_poll_at(client.fetch().await.into(), 200.0);
    assert!(!app.fetch_error());
    assert_eq!(app.last_snapshot().map(|s| s.cpu_percent), Some(45.0));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let addr = serve(Router::new().route(
        "/api/metrics",
        get(|| async { Json(json!({"cpu": {"percent": 12.0}})) }),
    ))
    .await;
    let client = MetricsClient::new(&base(addr)).unwrap();
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_agent_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = MetricsClient::new(&base(addr)).unwrap();
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn poller_delivers_on_interval() {
    let addr = flaky_agent().await;
    let client = MetricsClient::new(&base(addr)).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = spawn_poller(client, Duration::from_millis(50), tx);

    let mut outcomes = Vec::new();
    while outcomes.len() < 3 {
        let o = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("poll outcome in time")
            .expect("channel open");
        outcomes.push(o);
    }
    handle.abort();

    let failures = outcomes
        .iter()
        .filter(|o| matches!(o, PollOutcome::Failed(_)))
        .count();
    assert_eq!(failures, 1);
    assert!(outcomes
        .iter()
        .any(|o| matches!(o, PollOutcome::Snapshot(s) if s.cpu_percent == 45.0)));
}
