// File: crates/agentchart-skia/src/lib.rs
// Summary: Skia renderer crate: CPU raster surfaces and text shaping for chart scenes.

pub mod raster;
pub mod text;
pub mod theme;

pub use raster::{RasterOptions, SkiaRenderer};
pub use text::TextShaper;
pub use theme::Theme;
