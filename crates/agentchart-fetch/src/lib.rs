// File: crates/agentchart-fetch/src/lib.rs
// Summary: Async fetch stage: pulls metric series over HTTP, lays them out with
// agentchart-core and appends the SVG to a render target.

pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod target;

pub use client::GraphClient;
pub use config::{load_default, load_from_file, load_from_str, AgentChartConfig, ChartSection, ServerSection};
pub use error::{ChartError, ErrorKind, Result};
pub use render::{ChartHandle, ChartRenderer, RenderState};
pub use target::{FileTarget, MemoryTarget, RenderTarget, RenderedChart};
