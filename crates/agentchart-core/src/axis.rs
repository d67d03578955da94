// File: crates/agentchart-core/src/axis.rs
// Summary: Axis model: orientation, tick layout and labels computed from a scale.

use crate::path::fmt_num;
use crate::scale::{LinearScale, ScaleTransform, TimeScale};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
}

/// Tick geometry. A negative `inner_size` extends ticks across the plot,
/// which is how grid lines are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOptions {
    pub count: usize,
    pub inner_size: f64,
    pub outer_size: f64,
    pub padding: f64,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self { count: 10, inner_size: 6.0, outer_size: 6.0, padding: 3.0 }
    }
}

impl TickOptions {
    /// Full-width grid ticks across a plot `extent` pixels deep.
    pub fn grid(extent: f64) -> Self {
        Self { count: 10, inner_size: -extent, outer_size: 0.0, padding: 10.0 }
    }
}

/// One tick: pixel offset along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

/// Anything an axis can pull ticks from.
pub trait TickSource {
    fn tick_marks(&self, count: usize) -> Vec<Tick>;
    fn pixel_range(&self) -> (f64, f64);
}

impl TickSource for LinearScale {
    fn tick_marks(&self, count: usize) -> Vec<Tick> {
        self.ticks(count)
            .into_iter()
            .map(|v| Tick { offset: self.to_px(v), label: self.format_tick(v, count) })
            .collect()
    }

    fn pixel_range(&self) -> (f64, f64) { self.range }
}

impl TickSource for TimeScale {
    fn tick_marks(&self, count: usize) -> Vec<Tick> {
        let (interval, ticks) = self.ticks(count);
        let fmt = interval.label_format();
        ticks
            .into_iter()
            .map(|t| Tick { offset: self.time_to_px(t), label: t.format(fmt).to_string() })
            .collect()
    }

    fn pixel_range(&self) -> (f64, f64) { ScaleTransform::range(self) }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orientation: Orientation,
    pub options: TickOptions,
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
    /// Rotated title drawn at the top of a left axis.
    pub title: Option<String>,
}

/// Lay out an axis for `scale`.
pub fn make_axis<S: TickSource + ?Sized>(scale: &S, orientation: Orientation, options: TickOptions) -> Axis {
    Axis {
        orientation,
        options,
        range: scale.pixel_range(),
        ticks: scale.tick_marks(options.count),
        title: None,
    }
}

impl Axis {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Outline along the axis, with outer ticks at both ends.
    pub fn domain_path(&self) -> String {
        let (r0, r1) = if self.range.0 <= self.range.1 { self.range } else { (self.range.1, self.range.0) };
        let o = self.options.outer_size;
        match self.orientation {
            Orientation::Bottom => format!("M{},{}V0H{}V{}", fmt_num(r0), fmt_num(o), fmt_num(r1), fmt_num(o)),
            Orientation::Left => format!("M{},{}H0V{}H{}", fmt_num(-o), fmt_num(r0), fmt_num(r1), fmt_num(-o)),
        }
    }

    /// Signed distance from the axis line to the label anchor.
    pub fn label_offset(&self) -> f64 {
        self.options.inner_size.max(0.0) + self.options.padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::make_scale;

    #[test]
    fn grid_axis_has_ticks_across_plot() {
        let y = make_scale((0.0, 10.0), (100.0, 0.0));
        let axis = make_axis(&y, Orientation::Left, TickOptions::grid(300.0));
        assert_eq!(axis.ticks.len(), 11);
        assert_eq!(axis.ticks[0].offset, 100.0);
        assert_eq!(axis.ticks[10].label, "10");
        assert_eq!(axis.options.inner_size, -300.0);
        assert_eq!(axis.label_offset(), 10.0);
        assert_eq!(axis.domain_path(), "M0,0H0V100H0");
    }
}
