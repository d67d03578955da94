// File: crates/agentchart-core/src/scene.rs
// Summary: Renderer-agnostic chart scene: one surface, a translated plot group,
// and the path/axis nodes drawn into it.

use crate::axis::Axis;
use crate::palette::Color;
use crate::path::{area_d, line_d, AreaVertex};

/// Geometry of a path node, in plot coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line(Vec<Vec<(f64, f64)>>),
    Area(Vec<Vec<AreaVertex>>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub class: String,
    pub shape: Shape,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
}

impl PathNode {
    /// SVG path data for the shape.
    pub fn d(&self) -> String {
        match &self.shape {
            Shape::Line(segs) => line_d(segs),
            Shape::Area(segs) => area_d(segs),
        }
    }

    /// Number of disjoint sub-paths.
    pub fn segment_count(&self) -> usize {
        match &self.shape {
            Shape::Line(segs) => segs.len(),
            Shape::Area(segs) => segs.len(),
        }
    }
}

/// An axis placed at `offset` inside the plot group.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisNode {
    pub class: String,
    pub offset: (f64, f64),
    pub axis: Axis,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Path(PathNode),
    Axis(AxisNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub class: Option<String>,
    /// Translation of the plot group (the top-left margin).
    pub origin: (f64, f64),
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn paths(&self) -> impl Iterator<Item = &PathNode> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Path(p) => Some(p),
            Node::Axis(_) => None,
        })
    }

    pub fn axes(&self) -> impl Iterator<Item = &AxisNode> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Axis(a) => Some(a),
            Node::Path(_) => None,
        })
    }

    /// First path node with the given class.
    pub fn path(&self, class: &str) -> Option<&PathNode> {
        self.paths().find(|p| p.class == class)
    }
}
