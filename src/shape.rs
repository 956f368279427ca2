//! Geometry primitives for vector symbols.
//!
//! Shapes are authored in page-normalized coordinates and re-expressed in
//! symbol-local `[0,1]` space by the builder. The two spaces share the same
//! types; a `Point` never records which space it is in, so callers must
//! transform explicitly and never mix spaces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Opaque stroke/fill color. Alpha lives on the style as `fill_opacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Option<Color> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }
}

/// Fields shared by every shape variant. `fill: None` means no fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,
    pub fill: Option<Color>,
    pub stroke_width: f64,
    pub fill_opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            color: Color::BLACK,
            fill: None,
            stroke_width: 1.0,
            fill_opacity: 1.0,
        }
    }
}

/// Shape geometry, one variant per drawable kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    Rect { start: Point, end: Point },
    Ellipse { start: Point, end: Point },
    Line { start: Point, end: Point },
    Arrow { start: Point, end: Point },
    Polyline { points: Vec<Point> },
    Polygon { points: Vec<Point> },
    Text { origin: Point, text: String, font_size: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub style: Style,
    /// Degrees, clockwise, about the shape's own center.
    pub rotation: f64,
    pub geometry: Geometry,
}

impl Shape {
    pub fn new(geometry: Geometry) -> Self {
        Shape {
            style: Style::default(),
            rotation: 0.0,
            geometry,
        }
    }

    /// Enforce `start <= end` per axis for box-like geometries.
    /// Lines and arrows keep their direction; point lists are untouched.
    pub fn normalize_box(&mut self) {
        match &mut self.geometry {
            Geometry::Rect { start, end } | Geometry::Ellipse { start, end } => {
                if start.x > end.x {
                    std::mem::swap(&mut start.x, &mut end.x);
                }
                if start.y > end.y {
                    std::mem::swap(&mut start.y, &mut end.y);
                }
            }
            _ => {}
        }
    }

    /// Extremal points of the geometry: every vertex for point lists,
    /// both corners for box-like shapes, the origin for text.
    pub fn extremal_points(&self) -> Vec<Point> {
        match &self.geometry {
            Geometry::Rect { start, end }
            | Geometry::Ellipse { start, end }
            | Geometry::Line { start, end }
            | Geometry::Arrow { start, end } => vec![*start, *end],
            Geometry::Polyline { points } | Geometry::Polygon { points } => points.clone(),
            Geometry::Text { origin, .. } => vec![*origin],
        }
    }

    /// Apply `f` to every coordinate-bearing point in place.
    pub fn map_points<F: FnMut(Point) -> Point>(&mut self, mut f: F) {
        match &mut self.geometry {
            Geometry::Rect { start, end }
            | Geometry::Ellipse { start, end }
            | Geometry::Line { start, end }
            | Geometry::Arrow { start, end } => {
                *start = f(*start);
                *end = f(*end);
            }
            Geometry::Polyline { points } | Geometry::Polygon { points } => {
                for p in points.iter_mut() {
                    *p = f(*p);
                }
            }
            Geometry::Text { origin, .. } => {
                *origin = f(*origin);
            }
        }
    }
}

/// Axis-aligned bounding box over a set of shapes, or `None` for an
/// empty set.
pub fn bounding_box(shapes: &[Shape]) -> Option<(Point, Point)> {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    let mut any = false;
    for shape in shapes {
        for p in shape.extremal_points() {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            any = true;
        }
    }
    if any { Some((min, max)) } else { None }
}
