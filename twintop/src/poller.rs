//! HTTP polling of the agent's `/api/metrics` on a fixed cadence.
//!
//! Each tick starts an independent fetch; results go to the app over a channel
//! in the order they complete, so a slow reply that lands after a newer one
//! still wins (last arrival wins).

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::types::MetricsSnapshot;

pub const METRICS_PATH: &str = "api/metrics";
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug)]
pub enum PollOutcome {
    Snapshot(MetricsSnapshot),
    Failed(FetchError),
}

impl From<Result<MetricsSnapshot, FetchError>> for PollOutcome {
    fn from(r: Result<MetricsSnapshot, FetchError>) -> Self {
        match r {
            Ok(s) => PollOutcome::Snapshot(s),
            Err(e) => PollOutcome::Failed(e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl MetricsClient {
    /// `base` is the agent root, e.g. `http://127.0.0.1:5000`.
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: base.join(METRICS_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One GET. Non-2xx counts as failure even when a body is present.
    pub async fn fetch(&self) -> Result<MetricsSnapshot, FetchError> {
        let resp = self.http.get(self.endpoint.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = resp.bytes().await?;
        MetricsSnapshot::from_json(&body)
    }
}

/// Start polling: first fetch immediately, then every `period`. Stops once the
/// receiving side is gone.
pub fn spawn_poller(
    client: MetricsClient,
    period: Duration,
    tx: UnboundedSender<PollOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                debug!("poll receiver dropped; stopping");
                break;
            }
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = PollOutcome::from(client.fetch().await);
                let _ = tx.send(outcome);
            });
        }
    })
}
