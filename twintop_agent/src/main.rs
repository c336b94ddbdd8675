//! twintop_agent: serves local system metrics to the twintop viewer over HTTP.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;
use twintop_agent::{routes::router, state::AppState};

const DEFAULT_PORT: u16 = 5000;

fn parse_port<I: IntoIterator<Item = String>>(args: I, default_port: u16) -> u16 {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut long: Option<String> = None;
    let mut short: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--port" => long = it.next(),
            "-p" => short = it.next(),
            _ if a.starts_with("--port=") => {
                if let Some((_, v)) = a.split_once('=') {
                    long = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    long.or(short)
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(default_port)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if std::env::args().any(|a| a == "--help" || a == "-h") {
        println!("Usage: twintop_agent [--port PORT|-p PORT]");
        return Ok(());
    }

    let default_port = std::env::var("TWINTOP_AGENT_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let port = parse_port(std::env::args(), default_port);

    let app = router(AppState::new());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("twintop_agent listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_port;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn port_long_short_and_assign() {
        assert_eq!(parse_port(args(&["agent", "--port", "9001"]), 5000), 9001);
        assert_eq!(parse_port(args(&["agent", "-p", "9002"]), 5000), 9002);
        assert_eq!(parse_port(args(&["agent", "--port=9003"]), 5000), 9003);
        assert_eq!(parse_port(args(&["agent", "-p", "nope"]), 5000), 5000);
        assert_eq!(parse_port(args(&["agent"]), 5000), 5000);
    }
}
