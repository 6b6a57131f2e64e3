//! Readiness gate: wait until the controller's view of the network matches
//! the expected node set.
//!
//! Flows must not be scheduled before the controller has finished topology
//! discovery, so callers poll the state endpoint until the reported node
//! count equals the number of hosts plus switches they stood up.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ControllerConfig;
use crate::error::{Error, Result};

const DEFAULT_MAX_ATTEMPTS: u32 = 20;
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Source of the controller-reported node set. Abstracted so tests can
/// script a sequence of responses.
#[async_trait]
pub trait NodeStateFetcher {
    /// One snapshot of the node identifiers the controller currently knows.
    /// The set is only ever counted, then discarded.
    async fn fetch_nodes(&self) -> Result<Vec<String>>;
}

/// Fetches the node set from `/wm/arscheduler/state/json`.
#[derive(Debug)]
pub struct RestStateFetcher {
    http: reqwest::Client,
    config: ControllerConfig,
}

impl RestStateFetcher {
    pub fn new(config: ControllerConfig) -> Self {
        RestStateFetcher { http: reqwest::Client::new(), config }
    }
}

#[async_trait]
impl NodeStateFetcher for RestStateFetcher {
    async fn fetch_nodes(&self) -> Result<Vec<String>> {
        let url = self.config.state_url();

        let response = self.http.get(&url).send().await.map_err(|e| {
            log::error!("State request to {} failed: {}", url, e);
            Error::ControllerUnreachable
        })?;

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            log::error!("Controller at {} answered with a non-JSON body: {}", url, e);
            Error::ControllerUnreachable
        })?;

        // The endpoint enumerates node identifiers either as an array or as
        // an object keyed by identifier.
        match payload {
            serde_json::Value::Array(entries) => Ok(entries
                .into_iter()
                .map(|entry| match entry {
                    serde_json::Value::String(id) => id,
                    other => other.to_string(),
                })
                .collect()),
            serde_json::Value::Object(map) => Ok(map.keys().cloned().collect()),
            other => {
                log::error!("Controller at {} reported an unexpected state payload: {}", url, other);
                Err(Error::ControllerUnreachable)
            }
        }
    }
}

/// Polls a [`NodeStateFetcher`] until the reported node count equals the
/// expected count, sleeping between polls with doubling backoff.
///
/// Terminal outcomes: converged (returns the number of polls it took),
/// [`Error::ControllerUnreachable`] on the first malformed or failed fetch
/// (no retry on that path), or [`Error::TopologyMismatch`] once the attempt
/// budget is spent.
#[derive(Debug, Clone)]
pub struct ConvergencePoller {
    expected_nodes: usize,
    poll_interval: Duration,
    max_attempts: u32,
}

impl ConvergencePoller {
    pub fn new(expected_nodes: usize, poll_interval: Duration) -> Self {
        ConvergencePoller { expected_nodes, poll_interval, max_attempts: DEFAULT_MAX_ATTEMPTS }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub async fn await_convergence(&self, fetcher: &dyn NodeStateFetcher) -> Result<u32> {
        let mut delay = self.poll_interval;
        let mut last_seen = 0;

        for attempt in 1..=self.max_attempts {
            let nodes = fetcher.fetch_nodes().await?;
            last_seen = nodes.len();

            if last_seen == self.expected_nodes {
                log::info!("Controller topology converged after {} poll(s): {} node(s) known", attempt, last_seen);
                return Ok(attempt);
            }

            log::info!(
                "Waiting for controller to finish populating topology... ({}/{} nodes, poll {}/{})",
                last_seen,
                self.expected_nodes,
                attempt,
                self.max_attempts
            );

            if attempt < self.max_attempts {
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(MAX_BACKOFF);
            }
        }

        Err(Error::TopologyMismatch { expected: self.expected_nodes, last_seen, attempts: self.max_attempts })
    }
}
