// File: crates/agentchart-fetch/src/error.rs
// Summary: Error type shared by every chart render, plus its coarse kind.

use std::time::Duration;

use agentchart_core::LayoutError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

/// Why a render produced no chart. Whatever the variant, nothing was appended.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: reqwest::StatusCode },
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },
    #[error("payload from {url} does not match the expected records: {source}")]
    DataShape {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot lay out chart: {0}")]
    Layout(#[from] LayoutError),
    #[error("render cancelled")]
    Cancelled,
    #[error("render target detached before the chart was ready")]
    Detached,
    #[error("render target rejected the chart: {0}")]
    Target(String),
    #[error("config: {0}")]
    Config(String),
    #[error("render task ended abnormally: {0}")]
    Task(String),
}

/// Coarse classification callers branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, non-2xx status or timeout.
    Network,
    /// Payload decoded badly or could not be laid out.
    DataShape,
    /// Cancelled, or the target went away.
    Aborted,
    Internal,
}

impl ChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::Network { .. } | ChartError::Status { .. } | ChartError::Timeout { .. } => ErrorKind::Network,
            ChartError::DataShape { .. } | ChartError::Layout(_) => ErrorKind::DataShape,
            ChartError::Cancelled | ChartError::Detached => ErrorKind::Aborted,
            ChartError::Target(_) | ChartError::Config(_) | ChartError::Task(_) => ErrorKind::Internal,
        }
    }
}
