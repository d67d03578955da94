// File: crates/agentchart-core/src/error.rs
// Summary: Layout-stage error type.

use thiserror::Error;

/// Everything that can stop a payload from becoming a chart scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("series is empty; nothing to plot")]
    Empty,
    #[error("point {index} has a non-finite timestamp")]
    NonFiniteX { index: usize },
    #[error("timestamp {secs} is outside the representable range")]
    TimestampRange { secs: f64 },
    #[error("{width}x{height} leaves no plot area inside the margins")]
    Geometry { width: u32, height: u32 },
    #[error("palette has {available} colors but the chart needs {needed}")]
    PaletteExhausted { needed: usize, available: usize },
    #[error("invalid color '{0}'")]
    InvalidColor(String),
}
