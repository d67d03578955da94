// File: crates/agentchart-core/src/svg.rs
// Summary: SVG markup writer for a chart scene.

use crate::axis::Orientation;
use crate::path::fmt_num;
use crate::scene::{AxisNode, Node, PathNode, Scene};

/// Serialize a scene to a standalone `<svg>` document.
pub fn render_svg(scene: &Scene) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}""#,
        scene.width, scene.height
    ));
    if let Some(class) = &scene.class {
        out.push_str(&format!(r#" class="{}""#, escape(class)));
    }
    out.push_str(">\n");
    out.push_str(&format!(
        "<g transform=\"translate({},{})\">\n",
        fmt_num(scene.origin.0),
        fmt_num(scene.origin.1)
    ));
    for node in &scene.nodes {
        match node {
            Node::Path(p) => write_path(&mut out, p),
            Node::Axis(a) => write_axis(&mut out, a),
        }
    }
    out.push_str("</g>\n</svg>\n");
    out
}

fn write_path(out: &mut String, p: &PathNode) {
    let fill = p.fill.map_or_else(|| "none".to_string(), |c| c.to_hex());
    out.push_str(&format!(r#"<path class="{}" d="{}" fill="{}""#, escape(&p.class), p.d(), fill));
    if let Some(stroke) = p.stroke {
        out.push_str(&format!(r#" stroke="{}""#, stroke.to_hex()));
    }
    out.push_str("/>\n");
}

fn write_axis(out: &mut String, node: &AxisNode) {
    let axis = &node.axis;
    out.push_str(&format!(
        "<g class=\"{}\" transform=\"translate({},{})\">\n",
        escape(&node.class),
        fmt_num(node.offset.0),
        fmt_num(node.offset.1)
    ));
    let inner = fmt_num(axis.options.inner_size);
    let gap = axis.label_offset();
    for tick in &axis.ticks {
        let label = escape(&tick.label);
        let at = fmt_num(tick.offset);
        match axis.orientation {
            Orientation::Bottom => out.push_str(&format!(
                "<g class=\"tick\" transform=\"translate({at},0)\"><line y2=\"{inner}\"/><text y=\"{}\" dy=\".71em\" text-anchor=\"middle\">{label}</text></g>\n",
                fmt_num(gap)
            )),
            Orientation::Left => out.push_str(&format!(
                "<g class=\"tick\" transform=\"translate(0,{at})\"><line x2=\"{}\"/><text x=\"{}\" dy=\".32em\" text-anchor=\"end\">{label}</text></g>\n",
                fmt_num(-axis.options.inner_size),
                fmt_num(-gap)
            )),
        }
    }
    out.push_str(&format!("<path class=\"domain\" d=\"{}\"/>\n", axis.domain_path()));
    if let Some(title) = &axis.title {
        out.push_str(&format!(
            "<text transform=\"rotate(-90)\" y=\"6\" dy=\".71em\" text-anchor=\"end\">{}</text>\n",
            escape(title)
        ));
    }
    out.push_str("</g>\n");
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
