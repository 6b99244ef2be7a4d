use std::fmt::Write as _;

use crate::geometry::TEXT_FONT_SIZE;
use crate::geometry::descriptor::GeometryDescriptor;

/// Serialize a descriptor as a standalone SVG document, with `text` centered in the text area,
/// one `<tspan>` per line.
///
/// Sticker bubbles get an `feDropShadow` filter; dashed bubbles a `stroke-dasharray` on both body
/// and tail.
pub fn to_svg(g: &GeometryDescriptor, text: &str) -> String {
    let mut out = String::new();
    let (w, h) = (g.viewport.width, g.viewport.height);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    let mut filter_attr = String::new();
    if let Some(shadow) = g.drop_shadow {
        let _ = writeln!(
            out,
            r#"  <defs><filter id="shadow"><feDropShadow dx="{}" dy="{}" stdDeviation="{}"/></filter></defs>"#,
            shadow.dx, shadow.dy, shadow.std_dev
        );
        filter_attr = r#" filter="url(#shadow)""#.to_owned();
    }

    let dash_attr = g
        .dash_pattern
        .map(|d| format!(r#" stroke-dasharray="{}""#, d.to_dasharray()))
        .unwrap_or_default();
    let paint = format!(
        r#"fill="{}" stroke="{}" stroke-width="{}"{dash_attr}"#,
        g.fill, g.stroke, g.stroke_width
    );

    let _ = writeln!(out, "  <g{filter_attr}>");
    let _ = writeln!(out, r#"    <path d="{}" {paint}/>"#, g.body_path.to_svg());
    if let Some(tail) = &g.tail_path {
        let _ = writeln!(out, r#"    <path d="{}" {paint}/>"#, tail.to_svg());
    }
    let _ = writeln!(out, "  </g>");

    let origins = g.text_line_origins(text);
    if !origins.is_empty() {
        let _ = writeln!(
            out,
            r#"  <text font-family="monospace" font-size="{TEXT_FONT_SIZE}" dominant-baseline="hanging">"#
        );
        for (p, line) in origins.iter().zip(text.lines()) {
            let _ = writeln!(
                out,
                r#"    <tspan x="{}" y="{}">{}</tspan>"#,
                p.x,
                p.y,
                escape_xml(line)
            );
        }
        let _ = writeln!(out, "  </text>");
    }
    out.push_str("</svg>\n");
    out
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/svg.rs"]
mod tests;
