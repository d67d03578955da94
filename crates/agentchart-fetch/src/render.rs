// File: crates/agentchart-fetch/src/render.rs
// Summary: Spawns chart renders as tokio tasks and hands back cancellable handles.

use std::future::Future;
use std::sync::Arc;

use agentchart_core::{render_svg, AreaChart, ChartConfig, Color, Overflow, Scene, StackedArea};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};

use crate::client::GraphClient;
use crate::config::AgentChartConfig;
use crate::error::{ChartError, Result};
use crate::target::{RenderTarget, RenderedChart};

/// Lifecycle of one render: `Idle -> Requesting -> Rendered | Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Requesting,
    Rendered,
    Failed,
}

impl RenderState {
    pub fn is_finished(self) -> bool {
        matches!(self, RenderState::Rendered | RenderState::Failed)
    }
}

/// Handle to a spawned render. Dropping it leaves the render running.
#[derive(Debug)]
pub struct ChartHandle {
    state: watch::Receiver<RenderState>,
    cancel: watch::Sender<bool>,
    task: JoinHandle<Result<()>>,
}

impl ChartHandle {
    pub fn state(&self) -> RenderState {
        *self.state.borrow()
    }

    /// Abort the fetch if still in flight and prevent the append.
    /// No effect once the chart has been appended.
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    /// Resolves with the final state without consuming the handle.
    pub async fn settled(&self) -> RenderState {
        let mut rx = self.state.clone();
        // Err means the task is gone; the last published state is final then too.
        let _ = rx.wait_for(|s| s.is_finished()).await;
        let state = *rx.borrow();
        state
    }

    pub async fn wait(self) -> Result<()> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(ChartError::Task(e.to_string())),
        }
    }
}

/// Entry point for fetch-and-render. Must be used from within a tokio runtime.
#[derive(Clone, Debug)]
pub struct ChartRenderer {
    client: Arc<GraphClient>,
    overflow: Overflow,
}

impl ChartRenderer {
    pub fn new(client: GraphClient) -> Self {
        Self { client: Arc::new(client), overflow: Overflow::default() }
    }

    pub fn from_config(cfg: &AgentChartConfig) -> Result<Self> {
        Ok(Self::new(GraphClient::from_config(&cfg.server)?).with_overflow(cfg.charts.palette_overflow))
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn client(&self) -> &GraphClient {
        &self.client
    }

    pub fn area_chart(&self, config: ChartConfig, target: Arc<dyn RenderTarget>, fill: Color) -> ChartHandle {
        let span = info_span!("area_chart", uid = %config.uid, datapoint = %config.datapoint);
        let client = Arc::clone(&self.client);
        spawn_render(target, span, async move {
            let points = client.fetch_series(&config.uid, &config.datapoint).await?;
            Ok::<Scene, ChartError>(AreaChart::new(config, fill).layout(&points)?.scene())
        })
    }

    pub fn stacked_area(
        &self,
        config: ChartConfig,
        target: Arc<dyn RenderTarget>,
        colors: Option<Vec<Color>>,
    ) -> ChartHandle {
        let span = info_span!("stacked_area", uid = %config.uid, datapoint = %config.datapoint);
        let client = Arc::clone(&self.client);
        let overflow = self.overflow;
        spawn_render(target, span, async move {
            let rows = client.fetch_stacked(&config.uid, &config.datapoint).await?;
            Ok::<Scene, ChartError>(StackedArea::new(config, colors).with_overflow(overflow).layout(&rows)?.scene())
        })
    }
}

fn spawn_render<F>(target: Arc<dyn RenderTarget>, span: tracing::Span, work: F) -> ChartHandle
where
    F: Future<Output = Result<Scene>> + Send + 'static,
{
    let (state_tx, state_rx) = watch::channel(RenderState::Idle);
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let task = tokio::spawn(
        async move {
            state_tx.send_replace(RenderState::Requesting);
            let scene = tokio::select! {
                biased;
                _ = cancelled(cancel_rx.clone()) => Err(ChartError::Cancelled),
                scene = work => scene,
            };
            let result = scene.and_then(|scene| deliver(target.as_ref(), &cancel_rx, scene));
            match &result {
                Ok(()) => {
                    state_tx.send_replace(RenderState::Rendered);
                    info!("chart appended");
                }
                Err(e) => {
                    state_tx.send_replace(RenderState::Failed);
                    warn!(error = %e, kind = ?e.kind(), "chart render failed");
                }
            }
            result
        }
        .instrument(span),
    );

    ChartHandle { state: state_rx, cancel: cancel_tx, task }
}

fn deliver(target: &dyn RenderTarget, cancel: &watch::Receiver<bool>, scene: Scene) -> Result<()> {
    if *cancel.borrow() {
        return Err(ChartError::Cancelled);
    }
    if !target.is_attached() {
        return Err(ChartError::Detached);
    }
    let svg = render_svg(&scene);
    target.append(RenderedChart { svg, scene })
}

// Resolves once cancellation is requested. A dropped handle never cancels.
async fn cancelled(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
