// File: crates/agentchart-core/src/chart.rs
// Summary: Area and stacked-area chart builders: payload in, laid-out scene out.

use chrono::{DateTime, Utc};

use crate::axis::{make_axis, Orientation, TickOptions};
use crate::data::{DataPoint, GroupedDataPoint, Sample};
use crate::error::LayoutError;
use crate::geometry::PlotArea;
use crate::palette::{palette_for, Color, Overflow};
use crate::path::{split_defined, AreaVertex};
use crate::scale::{make_scale, make_time_scale, LinearScale, ScaleTransform, TimeScale};
use crate::scene::{AxisNode, Node, PathNode, Scene, Shape};
use crate::stack::{stack_zero, tops, Layer};
use crate::svg::render_svg;
use crate::transform::{convert_grouped, convert_points, group_first_seen, time_extent, zero_based_domain, Rescale};
use crate::types::{ChartConfig, Insets};

/// Title of the area chart's y axis.
pub const Y_TITLE: &str = "Data";

/// Single-series area chart with a line along its top edge.
#[derive(Clone, Debug)]
pub struct AreaChart {
    pub config: ChartConfig,
    pub fill: Color,
}

/// Everything computed for an area chart before drawing.
#[derive(Clone, Debug)]
pub struct AreaLayout {
    pub plot: PlotArea,
    pub samples: Vec<Sample>,
    pub x_domain: (DateTime<Utc>, DateTime<Utc>),
    pub y_domain: (f64, f64),
    pub x: TimeScale,
    pub y: LinearScale,
    pub fill: Color,
}

impl AreaChart {
    pub fn new(config: ChartConfig, fill: Color) -> Self {
        Self { config, fill }
    }

    pub fn layout(&self, points: &[DataPoint]) -> Result<AreaLayout, LayoutError> {
        let plot = PlotArea::new(self.config.width, self.config.height, Insets::AREA)?;
        let samples = convert_points(points)?;
        let x_domain = time_extent(samples.iter().map(|s| s.t)).ok_or(LayoutError::Empty)?;
        let y_domain = zero_based_domain(samples.iter().filter_map(|s| s.y));
        let x = make_time_scale(x_domain, (0.0, plot.width()));
        let y = make_scale(y_domain, (plot.height(), 0.0));
        Ok(AreaLayout { plot, samples, x_domain, y_domain, x, y, fill: self.fill })
    }

    /// Lay out and serialize in one step.
    pub fn render_svg(&self, points: &[DataPoint]) -> Result<String, LayoutError> {
        Ok(render_svg(&self.layout(points)?.scene()))
    }
}

impl AreaLayout {
    pub fn scene(&self) -> Scene {
        let height = self.plot.height();
        let top_edge: Vec<Option<(f64, f64)>> = self
            .samples
            .iter()
            .map(|s| {
                s.y.filter(|_| s.is_defined())
                    .map(|y| (self.x.time_to_px(s.t), self.y.to_px(y)))
            })
            .collect();
        let area: Vec<Option<AreaVertex>> = top_edge
            .iter()
            .map(|v| v.map(|(x, y1)| AreaVertex { x, y0: height, y1 }))
            .collect();

        let nodes = vec![
            Node::Path(PathNode {
                class: "area".into(),
                shape: Shape::Area(split_defined(&area)),
                fill: Some(self.fill),
                stroke: None,
            }),
            Node::Path(PathNode {
                class: "line".into(),
                shape: Shape::Line(split_defined(&top_edge)),
                fill: None,
                stroke: Some(self.fill),
            }),
            x_axis_node(&self.x, &self.plot),
            Node::Axis(AxisNode {
                class: "y axis grid".into(),
                offset: (0.0, 0.0),
                axis: make_axis(&self.y, Orientation::Left, TickOptions::grid(self.plot.width())).with_title(Y_TITLE),
            }),
        ];

        Scene {
            width: self.plot.outer_width,
            height: self.plot.outer_height,
            class: Some("center-block".into()),
            origin: self.plot.origin(),
            nodes,
        }
    }
}

/// Multi-series chart: rows grouped by key, stacked on a zero baseline.
#[derive(Clone, Debug)]
pub struct StackedArea {
    pub config: ChartConfig,
    /// Caller colors; ignored for metrics with a fixed palette.
    pub colors: Option<Vec<Color>>,
    pub overflow: Overflow,
}

#[derive(Clone, Debug)]
pub struct StackedLayout {
    pub plot: PlotArea,
    pub layers: Vec<Layer>,
    pub colors: Vec<Color>,
    pub x_domain: (DateTime<Utc>, DateTime<Utc>),
    pub y_domain: (f64, f64),
    pub x: TimeScale,
    pub y: LinearScale,
}

impl StackedArea {
    pub fn new(config: ChartConfig, colors: Option<Vec<Color>>) -> Self {
        Self { config, colors, overflow: Overflow::default() }
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn layout(&self, rows: &[GroupedDataPoint]) -> Result<StackedLayout, LayoutError> {
        let plot = PlotArea::new(self.config.width, self.config.height, Insets::STACKED)?;
        let samples = convert_grouped(rows, Rescale::for_datapoint(&self.config.datapoint))?;
        let layers = stack_zero(&group_first_seen(samples));
        let colors = palette_for(&self.config.datapoint, self.colors.clone())
            .with_overflow(self.overflow)
            .assign(layers.len())?;

        let x_domain = time_extent(layers.iter().flat_map(|l| l.points.iter().map(|p| p.t)))
            .ok_or(LayoutError::Empty)?;
        let y_domain = zero_based_domain(tops(&layers));
        let x = make_time_scale(x_domain, (0.0, plot.width()));
        let y = make_scale(y_domain, (plot.height(), 0.0));
        Ok(StackedLayout { plot, layers, colors, x_domain, y_domain, x, y })
    }

    pub fn render_svg(&self, rows: &[GroupedDataPoint]) -> Result<String, LayoutError> {
        Ok(render_svg(&self.layout(rows)?.scene()))
    }
}

impl StackedLayout {
    pub fn scene(&self) -> Scene {
        let mut nodes: Vec<Node> = self
            .layers
            .iter()
            .zip(&self.colors)
            .map(|(layer, &color)| {
                let seg: Vec<AreaVertex> = layer
                    .points
                    .iter()
                    .map(|p| AreaVertex {
                        x: self.x.time_to_px(p.t),
                        y0: self.y.to_px(p.y0),
                        y1: self.y.to_px(p.top()),
                    })
                    .collect();
                Node::Path(PathNode {
                    class: "layer".into(),
                    shape: Shape::Area(if seg.is_empty() { Vec::new() } else { vec![seg] }),
                    fill: Some(color),
                    stroke: None,
                })
            })
            .collect();

        nodes.push(x_axis_node(&self.x, &self.plot));
        nodes.push(Node::Axis(AxisNode {
            class: "y axis grid".into(),
            offset: (0.0, 0.0),
            axis: make_axis(&self.y, Orientation::Left, TickOptions::grid(self.plot.width())),
        }));

        Scene {
            width: self.plot.outer_width,
            height: self.plot.outer_height,
            class: None,
            origin: self.plot.origin(),
            nodes,
        }
    }
}

fn x_axis_node(x: &TimeScale, plot: &PlotArea) -> Node {
    Node::Axis(AxisNode {
        class: "x axis grid".into(),
        offset: (0.0, plot.height()),
        axis: make_axis(x, Orientation::Bottom, TickOptions::grid(plot.height())),
    })
}
