// File: crates/agentchart-core/src/lib.rs
// Summary: Core library entry point; exports the pure layout pipeline
// (transform, stacking, scales, axes, paths) and the SVG scene writer.

pub mod axis;
pub mod chart;
pub mod data;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod path;
pub mod scale;
pub mod scene;
pub mod stack;
pub mod svg;
pub mod transform;
pub mod types;

pub use axis::{make_axis, Axis, Orientation, Tick, TickOptions};
pub use chart::{AreaChart, AreaLayout, StackedArea, StackedLayout};
pub use data::{DataPoint, GroupedDataPoint, Sample};
pub use error::LayoutError;
pub use geometry::PlotArea;
pub use palette::{palette_for, Color, Overflow, Palette};
pub use scale::{make_scale, make_time_scale, LinearScale, ScaleTransform, TimeScale};
pub use scene::{Node, Scene};
pub use stack::{stack_zero, Layer, StackedPoint};
pub use svg::render_svg;
pub use types::{ChartConfig, Insets, HEIGHT, WIDTH};
