// File: crates/agentchart-core/src/path.rs
// Summary: Line and area path generators with gap support, emitting SVG path data.

/// Screen-space vertex of an area: top edge at `y1`, bottom edge at `y0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaVertex {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Split a vertex run into contiguous defined segments; `None` breaks the run.
pub fn split_defined<T: Copy>(items: &[Option<T>]) -> Vec<Vec<T>> {
    let mut out = Vec::new();
    let mut cur: Vec<T> = Vec::new();
    for item in items {
        match item {
            Some(v) => cur.push(*v),
            None if !cur.is_empty() => out.push(std::mem::take(&mut cur)),
            None => {}
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Compact number for path data: three decimals at most, no `-0`.
pub fn fmt_num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        return "0".to_string();
    }
    format!("{r}")
}

fn point(x: f64, y: f64) -> String {
    format!("{},{}", fmt_num(x), fmt_num(y))
}

/// Path data for a polyline; one `M` per segment. A lone point closes on itself.
pub fn line_d(segments: &[Vec<(f64, f64)>]) -> String {
    let mut d = String::new();
    for seg in segments {
        for (i, &(x, y)) in seg.iter().enumerate() {
            d.push(if i == 0 { 'M' } else { 'L' });
            d.push_str(&point(x, y));
        }
        if seg.len() == 1 {
            d.push('Z');
        }
    }
    d
}

/// Path data for a filled area: along the top edge, back along the bottom
/// edge, closed. One closed sub-path per segment.
pub fn area_d(segments: &[Vec<AreaVertex>]) -> String {
    let mut d = String::new();
    for seg in segments {
        for (i, v) in seg.iter().enumerate() {
            d.push(if i == 0 { 'M' } else { 'L' });
            d.push_str(&point(v.x, v.y1));
        }
        for v in seg.iter().rev() {
            d.push('L');
            d.push_str(&point(v.x, v.y0));
        }
        if !seg.is_empty() {
            d.push('Z');
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_splits_runs() {
        let segs = split_defined(&[Some(1), None, None, Some(2), Some(3), None]);
        assert_eq!(segs, vec![vec![1], vec![2, 3]]);
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(0.1 + 0.2), "0.3");
        assert_eq!(fmt_num(-0.0004), "0");
        assert_eq!(fmt_num(-12.5), "-12.5");
    }

    #[test]
    fn line_and_area_data() {
        assert_eq!(line_d(&[vec![(0.0, 10.0), (5.0, 3.0)], vec![(9.0, 1.0)]]), "M0,10L5,3M9,1Z");
        let seg = vec![
            AreaVertex { x: 0.0, y0: 20.0, y1: 10.0 },
            AreaVertex { x: 5.0, y0: 20.0, y1: 3.0 },
        ];
        assert_eq!(area_d(&[seg]), "M0,10L5,3L5,20L0,20Z");
    }
}
