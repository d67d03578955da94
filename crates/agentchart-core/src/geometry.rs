// File: crates/agentchart-core/src/geometry.rs
// Summary: Plot-area geometry derived from outer size and margins.

use crate::error::LayoutError;
use crate::types::Insets;

/// Outer chart size plus margins. The plot area is what is left inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlotArea {
    pub outer_width: u32,
    pub outer_height: u32,
    pub insets: Insets,
}

impl PlotArea {
    /// Fails when the margins consume the whole surface in either direction.
    pub fn new(outer_width: u32, outer_height: u32, insets: Insets) -> Result<Self, LayoutError> {
        if outer_width <= insets.hsum() || outer_height <= insets.vsum() {
            return Err(LayoutError::Geometry { width: outer_width, height: outer_height });
        }
        Ok(Self { outer_width, outer_height, insets })
    }

    /// Usable plot width in pixels.
    pub fn width(&self) -> f64 { (self.outer_width - self.insets.hsum()) as f64 }
    /// Usable plot height in pixels.
    pub fn height(&self) -> f64 { (self.outer_height - self.insets.vsum()) as f64 }

    /// Top-left corner of the plot area inside the surface.
    pub fn origin(&self) -> (f64, f64) {
        (self.insets.left as f64, self.insets.top as f64)
    }
}
