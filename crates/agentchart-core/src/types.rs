// File: crates/agentchart-core/src/types.rs
// Summary: Shared types and constants (sizes, margins, chart config).

/// Default chart width in pixels.
pub const WIDTH: u32 = 630;
/// Default chart height in pixels.
pub const HEIGHT: u32 = 240;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Margins of the single-series area chart.
    pub const AREA: Insets = Insets::new(20, 20, 20, 30);
    /// Margins of the stacked chart; the wider left edge fits y tick labels.
    pub const STACKED: Insets = Insets::new(80, 20, 20, 30);

    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::AREA
    }
}

/// Identifies one chart: which agent, which metric, and how large.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartConfig {
    pub uid: String,
    pub datapoint: String,
    pub width: u32,
    pub height: u32,
}

impl ChartConfig {
    pub fn new(uid: impl Into<String>, datapoint: impl Into<String>) -> Self {
        Self { uid: uid.into(), datapoint: datapoint.into(), width: WIDTH, height: HEIGHT }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
