//! Entry point for the twintop viewer. Parses args, sets up logging and runs the App.

use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use twintop::app::App;
use twintop::config::{parse_args, Config, LOG_FILE_ENV, URL_ENV};
use twintop::poller::MetricsClient;

// The terminal belongs to the TUI, so logs only go to a file when one is named.
fn init_logging() -> anyhow::Result<()> {
    let Some(path) = env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn describe(config: &Config) -> anyhow::Result<String> {
    let client = MetricsClient::new(&config.url)?;
    Ok(format!(
        "endpoint: {}\ninterval: {} ms\nauto-rotate: {}",
        client.endpoint(),
        config.interval.as_millis(),
        if config.auto_rotate { "on" } else { "off" }
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match parse_args(env::args(), env::var(URL_ENV).ok()) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    if config.dry_run {
        println!("{}", describe(&config)?);
        return Ok(());
    }

    init_logging()?;
    let mut app = App::new(&config.url, config.auto_rotate);
    app.run(&config).await
}
