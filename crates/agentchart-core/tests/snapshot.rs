// File: crates/agentchart-core/tests/snapshot.rs
// Purpose: Golden SVG snapshots with bless flow.
// Behavior:
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, compares against the committed snapshot for an exact match.
// - A missing snapshot fails the test.

use agentchart_core::{AreaChart, ChartConfig, Color, DataPoint, GroupedDataPoint, StackedArea};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(name: &str, svg: &str) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name);
    if bless_mode() {
        std::fs::create_dir_all(path.parent().unwrap()).expect("create snapshots dir");
        std::fs::write(&path, svg).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), svg.len());
        return;
    }
    let want = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing snapshot {} ({e}); set UPDATE_SNAPSHOTS=1 to bless", path.display()));
    assert_eq!(svg, want, "rendered SVG differs from golden snapshot: {}", path.display());
}

#[test]
fn golden_area_chart() {
    let pts: Vec<DataPoint> = (0..12)
        .map(|i| DataPoint::new(1_500_000_000.0 + i as f64 * 300.0, if i == 6 { 0.0 } else { (i % 5) as f64 + 1.0 }))
        .collect();
    let svg = AreaChart::new(ChartConfig::new("agent-1", "cpu").with_size(630, 240), Color::rgb(0x31, 0x82, 0xbd))
        .render_svg(&pts)
        .expect("render");

    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"class="center-block""#));
    assert!(svg.contains(r#"<g transform="translate(20,20)">"#));
    assert!(svg.contains(r#"class="x axis grid" transform="translate(0,190)""#));
    assert!(svg.contains(">Data</text>"));
    write_or_compare("area_chart.svg", &svg);
}

#[test]
fn golden_stacked_chart() {
    let mut rows = Vec::new();
    for i in 0..8 {
        let x = 1_500_000_000.0 + i as f64 * 3_600.0;
        rows.push(GroupedDataPoint::new(x, 1.0 + i as f64 * 0.25, "1m"));
        rows.push(GroupedDataPoint::new(x, 0.5, "5m"));
        rows.push(GroupedDataPoint::new(x, 0.25, "15m"));
    }
    let svg = StackedArea::new(ChartConfig::new("agent-1", "load"), None).render_svg(&rows).expect("render");

    assert_eq!(svg.matches(r#"<path class="layer""#).count(), 3);
    assert!(svg.contains(r##"fill="#f37372""##));
    assert!(svg.contains(r##"fill="#fdbb5d""##));
    assert!(svg.contains(r#"<g transform="translate(80,20)">"#));
    write_or_compare("stacked_chart.svg", &svg);
}
