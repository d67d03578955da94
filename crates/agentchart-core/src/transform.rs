// File: crates/agentchart-core/src/transform.rs
// Summary: Pure data pass ahead of layout: timestamp conversion, unit rescaling,
// grouping and domain computation.

use chrono::{DateTime, Utc};

use crate::data::{to_datetime, DataPoint, GroupedDataPoint, GroupedSample, Sample};
use crate::error::LayoutError;

/// Bytes per display unit for the `memory` metric.
pub const MEMORY_DIVISOR: f64 = 10_000_000_000.0;

/// Unit conversion applied to every `y` before layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rescale {
    None,
    Divide(f64),
}

impl Rescale {
    /// The conversion the given metric needs.
    pub fn for_datapoint(datapoint: &str) -> Self {
        match datapoint {
            "memory" => Rescale::Divide(MEMORY_DIVISOR),
            _ => Rescale::None,
        }
    }

    pub fn apply(self, y: f64) -> f64 {
        match self {
            Rescale::None => y,
            Rescale::Divide(d) => y / d,
        }
    }
}

/// Convert wire points to samples sorted by time.
pub fn convert_points(points: &[DataPoint]) -> Result<Vec<Sample>, LayoutError> {
    if points.is_empty() {
        return Err(LayoutError::Empty);
    }
    let mut out = points
        .iter()
        .enumerate()
        .map(|(i, p)| Ok(Sample { t: to_datetime(p.x, i)?, y: p.y }))
        .collect::<Result<Vec<_>, LayoutError>>()?;
    out.sort_by_key(|s| s.t);
    Ok(out)
}

/// Convert grouped wire rows, rescaling `y`. Input order is kept; grouping
/// depends on it.
pub fn convert_grouped(rows: &[GroupedDataPoint], rescale: Rescale) -> Result<Vec<GroupedSample>, LayoutError> {
    if rows.is_empty() {
        return Err(LayoutError::Empty);
    }
    rows.iter()
        .enumerate()
        .map(|(i, r)| {
            Ok(GroupedSample {
                t: to_datetime(r.x, i)?,
                y: r.y.map(|y| rescale.apply(y)),
                group: r.group.clone(),
            })
        })
        .collect()
}

/// Rows of one group, sorted by time.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub key: String,
    pub samples: Vec<(DateTime<Utc>, f64)>,
}

/// Split rows by group key, groups ordered by first appearance.
/// Null values count as zero.
pub fn group_first_seen(rows: Vec<GroupedSample>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for row in rows {
        let y = row.y.filter(|v| !v.is_nan()).unwrap_or(0.0);
        match groups.iter_mut().find(|g| g.key == row.group) {
            Some(g) => g.samples.push((row.t, y)),
            None => groups.push(Group { key: row.group, samples: vec![(row.t, y)] }),
        }
    }
    for g in &mut groups {
        g.samples.sort_by_key(|(t, _)| *t);
    }
    groups
}

/// `[min, max]` of the given timestamps.
pub fn time_extent<I>(times: I) -> Option<(DateTime<Utc>, DateTime<Utc>)>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    times.into_iter().fold(None, |acc, t| match acc {
        None => Some((t, t)),
        Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
    })
}

/// `[0, max]` over the numeric values; NaN is skipped and an all-missing
/// input gives `[0, 0]`.
pub fn zero_based_domain<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let max = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));
    (0.0, max.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_is_rescaled_and_others_are_not() {
        assert_eq!(Rescale::for_datapoint("memory").apply(10_000_000_000.0), 1.0);
        assert_eq!(Rescale::for_datapoint("load").apply(2.5), 2.5);
    }

    #[test]
    fn points_are_sorted_by_time() {
        let s = convert_points(&[DataPoint::new(30.0, 1.0), DataPoint::new(10.0, 2.0)]).unwrap();
        assert!(s[0].t < s[1].t);
        assert_eq!(s[0].y, Some(2.0));
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert_eq!(convert_points(&[]), Err(LayoutError::Empty));
        assert_eq!(convert_grouped(&[], Rescale::None), Err(LayoutError::Empty));
    }
}
