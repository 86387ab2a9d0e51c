//! SVG renderer: converts a [`LayoutReport`] to an SVG string.
//!
//! Blocks are drawn as rectangles centered on their layout position, edges as
//! polylines through their drawing-space points with an arrowhead at the
//! destination. Back edges carry their emphasis hint as stroke opacity.

use crate::graph::EdgeKind;
use crate::report::{BlockReport, EdgeReport, LayoutReport};

// ── Constants ────────────────────────────────────────────────────────────────

const FONT_SIZE: i32 = 12;
const FONT_FAMILY: &str = "monospace";

const FILL_STROKE: &str = r#"fill="white" stroke="black" stroke-width="1.5""#;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn font(size: i32) -> String {
    format!(r#"font-family="{FONT_FAMILY}" font-size="{size}""#)
}

/// Coordinates are printed with at most two decimals.
fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

// ── Edge stroke helpers ──────────────────────────────────────────────────────

fn stroke_color(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Conditional => "#1f5fbf",
        EdgeKind::Fallthrough | EdgeKind::Jump => "black",
    }
}

fn dash_style(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Fallthrough => r#" stroke-dasharray="6 4""#,
        EdgeKind::Conditional | EdgeKind::Jump => "",
    }
}

// ── Block rendering ──────────────────────────────────────────────────────────

fn render_block(block: &BlockReport) -> String {
    let sx = block.center.x - block.width / 2.0;
    let sy = block.center.y - block.height / 2.0;
    let (cx, cy) = (num(block.center.x), num(block.center.y));
    let label = escape(&block.label);
    let lines: Vec<&str> = label.split('\n').collect();
    let f = font(FONT_SIZE);

    let label_svg = if lines.len() == 1 {
        format!(
            r#"<text x="{cx}" y="{cy}" dominant-baseline="central" text-anchor="middle" {f}>{}</text>"#,
            lines[0]
        )
    } else {
        let line_h = f64::from(FONT_SIZE + 2);
        let start_y = block.center.y - line_h * lines.len() as f64 / 2.0 + line_h / 2.0;
        let tspans: String = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let ty = num(start_y + i as f64 * line_h);
                format!(r#"<tspan x="{cx}" y="{ty}">{line}</tspan>"#)
            })
            .collect();
        format!(r#"<text text-anchor="middle" {f}>{tspans}</text>"#)
    };

    format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {FILL_STROKE}/>\n{label_svg}",
        num(sx),
        num(sy),
        num(block.width),
        num(block.height)
    )
}

// ── Edge rendering ───────────────────────────────────────────────────────────

fn render_edge(edge: &EdgeReport) -> String {
    if edge.points.len() < 2 {
        return String::new();
    }

    let pts = edge
        .points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ");
    let color = stroke_color(edge.kind);
    let dash = dash_style(edge.kind);
    let opacity = match edge.emphasis {
        Some(e) => format!(r#" stroke-opacity="{}""#, num(e.clamp(0.0, 1.0))),
        None => String::new(),
    };

    format!(
        r#"<polyline points="{pts}" fill="none" stroke="{color}" stroke-width="1.5"{dash}{opacity} marker-end="url(#arrowhead)"/>"#
    )
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Render a finished layout. An empty layout renders as an empty string.
pub fn render(report: &LayoutReport) -> String {
    if report.blocks.is_empty() {
        return String::new();
    }

    let w = num(report.width);
    let h = num(report.height);
    let mut parts = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        ),
        "<defs>".to_string(),
        r#"  <marker id="arrowhead" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto">"#.to_string(),
        r#"    <polygon points="0 0, 10 3.5, 0 7" fill="black"/>"#.to_string(),
        "  </marker>".to_string(),
        "</defs>".to_string(),
        format!(r#"<rect width="{w}" height="{h}" fill="white"/>"#),
    ];

    // Edges behind blocks, in routing order.
    for edge in &report.edges {
        let svg = render_edge(edge);
        if !svg.is_empty() {
            parts.push(svg);
        }
    }

    for block in &report.blocks {
        parts.push(render_block(block));
    }

    parts.push("</svg>".to_string());
    parts.join("\n")
}
