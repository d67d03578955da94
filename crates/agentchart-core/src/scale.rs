// File: crates/agentchart-core/src/scale.rs
// Summary: Linear (value) and time scales mapping data domains to pixel ranges,
// with tick generation.

use chrono::{DateTime, Utc};

use crate::data::to_secs;

/// Common mapping between a data domain and a pixel range.
pub trait ScaleTransform {
    fn to_px(&self, v: f64) -> f64;
    fn from_px(&self, px: f64) -> f64;
    fn range(&self) -> (f64, f64);
}

/// Continuous linear mapping `domain -> range`.
///
/// A degenerate domain (`d0 == d1`) maps every value onto `range.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

/// Build a linear scale. Ranges may be inverted (e.g. `[height, 0]` for y).
pub fn make_scale(domain: (f64, f64), range: (f64, f64)) -> LinearScale {
    LinearScale { domain, range }
}

impl ScaleTransform for LinearScale {
    #[inline]
    fn to_px(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() < 1e-12 {
            return r0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    #[inline]
    fn from_px(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span.abs() < 1e-12 {
            return d0;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }

    fn range(&self) -> (f64, f64) { self.range }
}

impl LinearScale {
    /// Roughly `count` round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }

    /// Label for a tick value, with as many decimals as the tick step needs.
    pub fn format_tick(&self, v: f64, count: usize) -> String {
        let (lo, hi) = ordered(self.domain);
        format_value(v, tick_step(lo, hi, count))
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Step between ticks: a power of ten times 1, 2 or 5.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return 0.0;
    }
    let m = count as f64;
    let mut step = 10f64.powf((span / m).log10().floor());
    let err = m / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    step
}

/// Round tick values covering `[start, stop]`.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = ordered((start, stop));
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let step = tick_step(lo, hi, count);
    if step == 0.0 {
        return vec![lo];
    }
    let i0 = (lo / step).ceil() as i64;
    let i1 = (hi / step).floor() as i64;
    if step < 1.0 {
        // divide by the inverse step to keep 0.1-style steps exact
        let inv = (1.0 / step).round();
        (i0..=i1).map(|i| i as f64 / inv).collect()
    } else {
        (i0..=i1).map(|i| i as f64 * step).collect()
    }
}

/// Format with thousands separators and the precision implied by `step`.
pub fn format_value(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10() - 1e-9).ceil().max(0.0) as usize
    } else {
        0
    };
    let raw = format!("{:.*}", decimals, v);
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if grouped.chars().all(|c| c == '0' || c == ',') && frac.map_or(true, |f| f.chars().all(|c| c == '0')) {
        ""
    } else {
        sign
    };
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Calendar step used for time ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    Seconds(i64),
    Minutes(i64),
    Hours(i64),
    Days(i64),
    Weeks(i64),
}

const DAY: i64 = 86_400;
const WEEK: i64 = 7 * DAY;
// 1970-01-04, the first Sunday after the epoch
const WEEK_ANCHOR: i64 = 3 * DAY;

const INTERVALS: [TimeInterval; 15] = [
    TimeInterval::Seconds(1),
    TimeInterval::Seconds(5),
    TimeInterval::Seconds(15),
    TimeInterval::Seconds(30),
    TimeInterval::Minutes(1),
    TimeInterval::Minutes(5),
    TimeInterval::Minutes(15),
    TimeInterval::Minutes(30),
    TimeInterval::Hours(1),
    TimeInterval::Hours(3),
    TimeInterval::Hours(6),
    TimeInterval::Hours(12),
    TimeInterval::Days(1),
    TimeInterval::Days(2),
    TimeInterval::Weeks(1),
];

impl TimeInterval {
    pub fn secs(self) -> i64 {
        match self {
            TimeInterval::Seconds(n) => n,
            TimeInterval::Minutes(n) => n * 60,
            TimeInterval::Hours(n) => n * 3_600,
            TimeInterval::Days(n) => n * DAY,
            TimeInterval::Weeks(n) => n * WEEK,
        }
    }

    /// `strftime` pattern for tick labels at this granularity.
    pub fn label_format(self) -> &'static str {
        match self {
            TimeInterval::Seconds(_) => "%H:%M:%S",
            TimeInterval::Minutes(_) | TimeInterval::Hours(_) => "%H:%M",
            TimeInterval::Days(_) | TimeInterval::Weeks(_) => "%b %d",
        }
    }

    /// Interval whose length is closest to `span / count`; past one week,
    /// whole-day multiples picked by the linear 1-2-5 rule.
    pub fn choose(span_secs: f64, count: usize) -> Self {
        let target = span_secs / count.max(1) as f64;
        let durations = INTERVALS.map(|i| i.secs() as f64);
        let idx = durations.partition_point(|&d| d < target);
        if idx == 0 {
            return INTERVALS[0];
        }
        if idx == INTERVALS.len() {
            let days = tick_step(0.0, span_secs / DAY as f64, count).max(1.0);
            return TimeInterval::Days(days.round() as i64);
        }
        if target / durations[idx - 1] < durations[idx] / target {
            INTERVALS[idx - 1]
        } else {
            INTERVALS[idx]
        }
    }

    fn anchor(self) -> i64 {
        match self {
            TimeInterval::Weeks(_) => WEEK_ANCHOR,
            _ => 0,
        }
    }
}

/// Linear scale over time, in UTC. The domain is held as unix seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    linear: LinearScale,
}

pub fn make_time_scale(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> TimeScale {
    TimeScale { linear: make_scale((to_secs(domain.0), to_secs(domain.1)), range) }
}

impl ScaleTransform for TimeScale {
    fn to_px(&self, secs: f64) -> f64 { self.linear.to_px(secs) }
    fn from_px(&self, px: f64) -> f64 { self.linear.from_px(px) }
    fn range(&self) -> (f64, f64) { self.linear.range }
}

impl TimeScale {
    #[inline]
    pub fn time_to_px(&self, t: DateTime<Utc>) -> f64 {
        self.linear.to_px(to_secs(t))
    }

    /// Tick timestamps aligned to the chosen interval, plus that interval.
    pub fn ticks(&self, count: usize) -> (TimeInterval, Vec<DateTime<Utc>>) {
        let (lo, hi) = ordered(self.linear.domain);
        let interval = TimeInterval::choose(hi - lo, count);
        let step = interval.secs();
        let anchor = interval.anchor();
        let first = ((lo - anchor as f64) / step as f64).ceil() as i64;
        let last = ((hi - anchor as f64) / step as f64).floor() as i64;
        let ticks = (first..=last)
            .filter_map(|k| DateTime::from_timestamp(anchor + k * step, 0))
            .collect();
        (interval, ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_scale_maps_and_inverts() {
        let s = make_scale((0.0, 10.0), (200.0, 0.0));
        assert_eq!(s.to_px(0.0), 200.0);
        assert_eq!(s.to_px(10.0), 0.0);
        assert_eq!(s.to_px(5.0), 100.0);
        assert_eq!(s.from_px(50.0), 7.5);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = make_scale((0.0, 0.0), (150.0, 0.0));
        assert_eq!(s.to_px(0.0), 150.0);
    }

    #[test]
    fn ticks_follow_one_two_five() {
        assert_eq!(linear_ticks(0.0, 10.0, 10), (0..=10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(linear_ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(linear_ticks(0.0, 1.0, 10)[3], 0.3);
    }

    #[test]
    fn values_are_grouped_and_trimmed() {
        assert_eq!(format_value(12_500.0, 500.0), "12,500");
        assert_eq!(format_value(0.3, 0.1), "0.3");
        assert_eq!(format_value(-1_000_000.0, 1.0), "-1,000,000");
        assert_eq!(format_value(-0.0, 1.0), "0");
    }

    #[test]
    fn time_interval_tracks_span() {
        assert_eq!(TimeInterval::choose(3_600.0, 10), TimeInterval::Minutes(5));
        assert_eq!(TimeInterval::choose(86_400.0, 10), TimeInterval::Hours(3));
        assert_eq!(TimeInterval::choose(5.0, 10), TimeInterval::Seconds(1));
        assert_eq!(TimeInterval::choose(365.0 * 86_400.0, 10), TimeInterval::Days(50));
    }

    #[test]
    fn time_ticks_are_aligned() {
        let lo = DateTime::from_timestamp(1_000, 0).unwrap();
        let hi = DateTime::from_timestamp(1_000 + 3_600, 0).unwrap();
        let (interval, ticks) = make_time_scale((lo, hi), (0.0, 600.0)).ticks(10);
        assert_eq!(interval, TimeInterval::Minutes(5));
        assert!(ticks.iter().all(|t| t.timestamp() % 300 == 0));
        assert_eq!(ticks.first().unwrap().timestamp(), 1_200);
    }
}
