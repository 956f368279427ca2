//! SVG preview rendering for vector symbols.
//!
//! Produces a stand-alone SVG document from a symbol's unit-box shapes,
//! scaled to a requested pixel size. Preview only; the host owns real
//! page rendering.

use crate::shape::{Geometry, Point, Shape, Style};
use crate::symbol::VectorSymbol;
use std::fmt::Write;

/// Render `symbol` into an SVG string `view_px` pixels wide, with
/// height following the symbol's aspect ratio.
pub fn vector_symbol_svg(symbol: &VectorSymbol, view_px: u32) -> String {
    let w = view_px as f64;
    let h = if symbol.aspect_ratio > 0.0 {
        w / symbol.aspect_ratio
    } else {
        w
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" xmlns="http://www.w3.org/2000/svg">"#
    );

    for shape in &symbol.shapes {
        write_shape(&mut out, shape, w, h);
    }

    out.push_str("</svg>\n");
    out
}

fn write_shape(out: &mut String, shape: &Shape, w: f64, h: f64) {
    let s = &shape.style;
    let scale = |p: Point| (p.x * w, p.y * h);

    match &shape.geometry {
        Geometry::Rect { start, end } => {
            let (x0, y0) = scale(*start);
            let (x1, y1) = scale(*end);
            let _ = writeln!(
                out,
                r#"  <rect x="{x0:.2}" y="{y0:.2}" width="{:.2}" height="{:.2}" {}/>"#,
                x1 - x0,
                y1 - y0,
                style_attrs(s)
            );
        }
        Geometry::Ellipse { start, end } => {
            let (x0, y0) = scale(*start);
            let (x1, y1) = scale(*end);
            let _ = writeln!(
                out,
                r#"  <ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" {}/>"#,
                (x0 + x1) / 2.0,
                (y0 + y1) / 2.0,
                (x1 - x0).abs() / 2.0,
                (y1 - y0).abs() / 2.0,
                style_attrs(s)
            );
        }
        Geometry::Line { start, end } | Geometry::Arrow { start, end } => {
            let (x0, y0) = scale(*start);
            let (x1, y1) = scale(*end);
            let _ = writeln!(
                out,
                r#"  <line x1="{x0:.2}" y1="{y0:.2}" x2="{x1:.2}" y2="{y1:.2}" stroke="{}" stroke-width="{:.2}"/>"#,
                s.color.to_hex(),
                s.stroke_width
            );
        }
        Geometry::Polyline { points } => {
            let _ = writeln!(
                out,
                r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{:.2}"/>"#,
                points_attr(points, w, h),
                s.color.to_hex(),
                s.stroke_width
            );
        }
        Geometry::Polygon { points } => {
            let _ = writeln!(
                out,
                r#"  <polygon points="{}" {}/>"#,
                points_attr(points, w, h),
                style_attrs(s)
            );
        }
        Geometry::Text {
            origin,
            text,
            font_size,
        } => {
            let (x, y) = scale(*origin);
            let _ = writeln!(
                out,
                r#"  <text x="{x:.2}" y="{y:.2}" font-size="{font_size:.1}" fill="{}">{}</text>"#,
                s.color.to_hex(),
                escape_text(text)
            );
        }
    }
}

fn style_attrs(s: &Style) -> String {
    let fill = match s.fill {
        Some(c) => format!(r#"fill="{}" fill-opacity="{:.2}""#, c.to_hex(), s.fill_opacity),
        None => r#"fill="none""#.to_string(),
    };
    format!(
        r#"{fill} stroke="{}" stroke-width="{:.2}""#,
        s.color.to_hex(),
        s.stroke_width
    )
}

fn points_attr(points: &[Point], w: f64, h: f64) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x * w, p.y * h))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
