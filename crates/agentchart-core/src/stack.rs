// File: crates/agentchart-core/src/stack.rs
// Summary: Zero-offset stacking of grouped series into layers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::transform::Group;

/// One point of a layer: drawn from `y0` up to `y0 + y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedPoint {
    pub t: DateTime<Utc>,
    pub y0: f64,
    pub y: f64,
}

impl StackedPoint {
    #[inline]
    pub fn top(&self) -> f64 { self.y0 + self.y }
}

/// One group after stacking, ready to render as a filled region.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub key: String,
    pub points: Vec<StackedPoint>,
}

/// Stack groups in the given order on a zero baseline.
///
/// Layers are aligned on the union of all timestamps. A group with no
/// sample at some timestamp contributes height zero there; several samples
/// of one group at the same timestamp are summed.
pub fn stack_zero(groups: &[Group]) -> Vec<Layer> {
    let per_group: Vec<BTreeMap<DateTime<Utc>, f64>> = groups
        .iter()
        .map(|g| {
            let mut m = BTreeMap::new();
            for &(t, y) in &g.samples {
                *m.entry(t).or_insert(0.0) += y;
            }
            m
        })
        .collect();

    let mut times: Vec<DateTime<Utc>> = per_group.iter().flat_map(|m| m.keys().copied()).collect();
    times.sort_unstable();
    times.dedup();

    let mut layers: Vec<Layer> = groups
        .iter()
        .map(|g| Layer { key: g.key.clone(), points: Vec::with_capacity(times.len()) })
        .collect();

    for &t in &times {
        let mut baseline = 0.0;
        for (layer, values) in layers.iter_mut().zip(&per_group) {
            let y = values.get(&t).copied().unwrap_or(0.0);
            layer.points.push(StackedPoint { t, y0: baseline, y });
            baseline += y;
        }
    }
    layers
}

/// Stacked tops (`y0 + y`) of every point of every layer.
pub fn tops(layers: &[Layer]) -> impl Iterator<Item = f64> + '_ {
    layers.iter().flat_map(|l| l.points.iter().map(StackedPoint::top))
}
