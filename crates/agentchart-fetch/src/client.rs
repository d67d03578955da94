// File: crates/agentchart-fetch/src/client.rs
// Summary: HTTP client for the agent metrics endpoints (URL building, timeout, JSON decode).

use std::time::Duration;

use agentchart_core::{DataPoint, GroupedDataPoint};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ServerSection;
use crate::error::{ChartError, Result};

/// Metrics server client. Cheap to share behind an `Arc`; holds no per-request state.
#[derive(Clone, Debug)]
pub struct GraphClient {
    http: reqwest::Client,
    base: Url,
    timeout: Duration,
}

impl GraphClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(ChartError::Config(format!("base url {base} cannot carry a path")));
        }
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ChartError::Config(format!("http client: {e}")))?;
        Ok(Self { http, base, timeout })
    }

    pub fn from_config(server: &ServerSection) -> Result<Self> {
        Self::new(server.url()?, server.timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base}/fetch/agent/graph/{uid}/{datapoint}`
    pub fn series_url(&self, uid: &str, datapoint: &str) -> Result<Url> {
        self.endpoint(&["fetch", "agent", "graph", uid, datapoint])
    }

    /// `{base}/fetch/agent/graph/stacked/{uid}/{datapoint}`
    pub fn stacked_url(&self, uid: &str, datapoint: &str) -> Result<Url> {
        self.endpoint(&["fetch", "agent", "graph", "stacked", uid, datapoint])
    }

    pub async fn fetch_series(&self, uid: &str, datapoint: &str) -> Result<Vec<DataPoint>> {
        self.get_json(self.series_url(uid, datapoint)?).await
    }

    pub async fn fetch_stacked(&self, uid: &str, datapoint: &str) -> Result<Vec<GroupedDataPoint>> {
        self.get_json(self.stacked_url(uid, datapoint)?).await
    }

    // Segments are pushed one by one so `/`, `?` and `#` inside ids get percent-encoded.
    // `.` and `..` would be resolved away by the url crate, and an empty id
    // leaves `//`, so those are refused before any request is made.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ChartError::Config(format!("'{bad}' is not a usable uid or datapoint")));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ChartError::Config(format!("base url {} cannot carry a path", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let label = url.to_string();
        debug!(url = %label, "requesting");
        let outcome = tokio::time::timeout(self.timeout, self.send(url, &label)).await;
        match outcome {
            Ok(result) => result,
            Err(_) => Err(ChartError::Timeout { url: label, timeout: self.timeout }),
        }
    }

    async fn send<T: DeserializeOwned>(&self, url: Url, label: &str) -> Result<T> {
        let network = |source| ChartError::Network { url: label.to_string(), source };
        let resp = self.http.get(url).send().await.map_err(network)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ChartError::Status { url: label.to_string(), status });
        }
        let body = resp.bytes().await.map_err(network)?;
        debug!(url = %label, status = status.as_u16(), bytes = body.len(), "response received");
        serde_json::from_slice(&body).map_err(|source| ChartError::DataShape { url: label.to_string(), source })
    }
}
