//! Build a vector symbol from authored shapes.

use crate::error::{EngineError, Result};
use crate::shape::{bounding_box, Geometry, Point, Shape};
use crate::simplify;
use crate::symbol::VectorSymbol;
use log::debug;

/// Default simplification tolerance in page-normalized units.
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.002;

/// Normalize a set of shapes authored in page coordinates into a
/// symbol whose coordinates live in the `[0,1]` space of its own
/// bounding box.
///
/// Polylines and polygons with more than 2 points are simplified before
/// the bounding box is computed. Fails on an empty shape set and on a
/// bounding box with zero width or height.
pub fn build_vector_symbol(
    mut shapes: Vec<Shape>,
    simplify_tolerance: f64,
) -> Result<VectorSymbol> {
    if shapes.is_empty() {
        return Err(EngineError::EmptyShapeSet);
    }

    for shape in shapes.iter_mut() {
        shape.normalize_box();
        match &mut shape.geometry {
            Geometry::Polyline { points } | Geometry::Polygon { points }
                if points.len() > 2 =>
            {
                *points = simplify::simplify(points, simplify_tolerance);
            }
            _ => {}
        }
    }

    let (min, max) = bounding_box(&shapes).ok_or(EngineError::EmptyShapeSet)?;
    let width = max.x - min.x;
    let height = max.y - min.y;
    if width <= 0.0 || height <= 0.0 {
        return Err(EngineError::DegenerateBoundingBox { width, height });
    }

    for shape in shapes.iter_mut() {
        shape.map_points(|p| Point::new((p.x - min.x) / width, (p.y - min.y) / height));
    }

    debug!(
        "built vector symbol: {} shapes, box {width:.4}x{height:.4}",
        shapes.len()
    );

    Ok(VectorSymbol {
        shapes,
        original_width: width,
        original_height: height,
        aspect_ratio: width / height,
    })
}
