// File: crates/agentchart-fetch/src/target.rs
// Summary: Render targets: where finished charts are appended.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use agentchart_core::Scene;

use crate::error::{ChartError, Result};

/// A finished chart: serialized markup plus the scene it came from.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    pub svg: String,
    pub scene: Scene,
}

/// Destination of a render. Appends happen only after a successful layout.
pub trait RenderTarget: Send + Sync {
    /// False once the target has gone away; a render then ends with `Detached`.
    fn is_attached(&self) -> bool;
    fn append(&self, chart: RenderedChart) -> Result<()>;
}

/// In-process target collecting SVG documents. Can be detached to model a
/// container that was removed while a fetch was in flight.
#[derive(Debug)]
pub struct MemoryTarget {
    attached: AtomicBool,
    charts: Mutex<Vec<String>>,
}

impl Default for MemoryTarget {
    fn default() -> Self {
        Self { attached: AtomicBool::new(true), charts: Mutex::new(Vec::new()) }
    }
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    /// Snapshot of appended charts, in append order.
    pub fn charts(&self) -> Vec<String> {
        match self.charts.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.charts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RenderTarget for MemoryTarget {
    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn append(&self, chart: RenderedChart) -> Result<()> {
        let mut g = self.charts.lock().map_err(|_| ChartError::Target("memory target lock poisoned".into()))?;
        g.push(chart.svg);
        Ok(())
    }
}

/// Writes the SVG document to a file. Each append replaces the previous one.
#[derive(Clone, Debug)]
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl RenderTarget for FileTarget {
    fn is_attached(&self) -> bool {
        true
    }

    fn append(&self, chart: RenderedChart) -> Result<()> {
        std::fs::write(&self.path, chart.svg)
            .map_err(|e| ChartError::Target(format!("write {}: {e}", self.path.display())))
    }
}
