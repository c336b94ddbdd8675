//! Serves the router on an ephemeral port and checks the JSON shapes the viewer relies on.

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use twintop_agent::{routes::router, state::AppState};

async fn spawn_agent() -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new())).await.ok();
    });
    addr
}

// Minimal HTTP/1.1 GET; returns (status, body).
async fn get(addr: std::net::SocketAddr, path: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    let req = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(req.as_bytes()).await.expect("write");
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.expect("read");
    let (head, body) = raw.split_once("\r\n\r\n").expect("http response");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("status code");
    (status, body.to_string())
}

fn pct(v: &Value) -> f64 {
    v.as_f64().expect("number")
}

#[tokio::test]
async fn metrics_endpoint_has_viewer_fields() {
    let addr = spawn_agent().await;
    let (status, body) = get(addr, "/api/metrics").await;
    assert_eq!(status, 200, "{body}");
    let v: Value = serde_json::from_str(&body).expect("json");

    for key in ["cpu", "memory", "disk", "battery"] {
        let p = pct(&v[key]["percent"]);
        assert!((0.0..=100.0).contains(&p), "{key}.percent out of range: {p}");
    }
    assert!(v["battery"]["plugged"].is_boolean());
    assert!(v["process_count"].is_u64());
    assert!(v["network"]["bytes_recv"].is_u64());
    assert!(v["timestamp"].is_string());
}

#[tokio::test]
async fn system_info_and_top_processes() {
    let addr = spawn_agent().await;

    let (status, body) = get(addr, "/api/system-info").await;
    assert_eq!(status, 200, "{body}");
    let info: Value = serde_json::from_str(&body).expect("json");
    assert!(info["cpu_count"].as_u64().unwrap_or(0) >= 1);
    assert!(info["has_battery"].is_boolean());

    let (status, body) = get(addr, "/api/processes/top").await;
    assert_eq!(status, 200, "{body}");
    let procs: Vec<Value> = serde_json::from_str(&body).expect("json array");
    assert!(procs.len() <= 10);
    let cpus: Vec<f64> = procs.iter().map(|p| pct(&p["cpu_percent"])).collect();
    assert!(cpus.windows(2).all(|w| w[0] >= w[1]), "not sorted: {cpus:?}");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let addr = spawn_agent().await;
    let (status, _) = get(addr, "/api/metrics/history").await;
    assert_eq!(status, 404);
}
