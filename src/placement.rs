//! Map a stored symbol into page coordinates.
//!
//! Bitmap symbols become one placed raster primitive. Vector symbols
//! either stay grouped (one record referencing the symbol, expanded by
//! the host at render time) or decompose into independent page-space
//! shapes with no live link back to the symbol definition.

use crate::editor::recolor_buffer;
use crate::error::{EngineError, Result};
use crate::raster::RasterBuffer;
use crate::shape::{Color, Point, Shape};
use crate::symbol::{Symbol, SymbolId};
use log::debug;

/// Gray cutoff used when recoloring a bitmap copy for placement.
/// Matches the editor's default ink mask.
const RECOLOR_GRAY_CUTOFF: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSettings {
    pub scale: f64,
    /// Degrees, added on top of each shape's own stored rotation.
    pub rotation: f64,
    pub color_override: Option<Color>,
    pub stroke_width_override: Option<f64>,
    /// Split a vector symbol into independently editable primitives.
    pub decompose: bool,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        PlacementSettings {
            scale: 1.0,
            rotation: 0.0,
            color_override: None,
            stroke_width_override: None,
            decompose: true,
        }
    }
}

/// Axis-aligned rectangle in page-normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct PlacedRaster {
    pub raster: RasterBuffer,
    pub bounds: PageRect,
    pub rotation: f64,
}

/// Grouped vector placement: the host expands it into visible shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupPlacement {
    pub symbol: SymbolId,
    pub center: Point,
    pub scale: f64,
    pub rotation: f64,
    pub color_override: Option<Color>,
}

/// A decomposed primitive. Carries its originating symbol for
/// provenance only; deleting the symbol does not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedShape {
    pub source_symbol: SymbolId,
    pub shape: Shape,
}

#[derive(Debug, Clone)]
pub enum Placement {
    Raster(PlacedRaster),
    Group(GroupPlacement),
    Shapes(Vec<PlacedShape>),
}

/// Place `symbol` centered at `center` (page-normalized). Either a
/// complete, internally consistent placement is produced or nothing is.
pub fn place(
    symbol: &Symbol,
    symbol_id: SymbolId,
    center: Point,
    settings: &PlacementSettings,
) -> Result<Placement> {
    if settings.scale <= 0.0 {
        return Err(EngineError::InvalidScale(settings.scale));
    }

    let sym_w = symbol.original_width() * settings.scale;
    let sym_h = symbol.original_height() * settings.scale;
    let top_left = Point::new(center.x - sym_w / 2.0, center.y - sym_h / 2.0);

    match symbol {
        Symbol::Bitmap(bitmap) => {
            let mut raster = bitmap.raster.clone();
            if let Some(color) = settings.color_override {
                recolor_buffer(&mut raster, color, RECOLOR_GRAY_CUTOFF);
            }
            debug!("placed bitmap symbol {symbol_id} at {center:?} scale {}", settings.scale);
            Ok(Placement::Raster(PlacedRaster {
                raster,
                bounds: PageRect {
                    x: top_left.x,
                    y: top_left.y,
                    width: sym_w,
                    height: sym_h,
                },
                rotation: settings.rotation,
            }))
        }
        Symbol::Vector(_) if !settings.decompose => Ok(Placement::Group(GroupPlacement {
            symbol: symbol_id,
            center,
            scale: settings.scale,
            rotation: settings.rotation,
            color_override: settings.color_override,
        })),
        Symbol::Vector(vector) => {
            let placed = vector
                .shapes
                .iter()
                .map(|shape| {
                    let mut shape = shape.clone();
                    shape.map_points(|p| {
                        Point::new(top_left.x + p.x * sym_w, top_left.y + p.y * sym_h)
                    });
                    shape.rotation += settings.rotation;
                    if let Some(color) = settings.color_override {
                        shape.style.color = color;
                    }
                    if let Some(width) = settings.stroke_width_override {
                        shape.style.stroke_width = width;
                    }
                    PlacedShape {
                        source_symbol: symbol_id,
                        shape,
                    }
                })
                .collect();
            debug!(
                "decomposed symbol {symbol_id} into {} primitives",
                vector.shapes.len()
            );
            Ok(Placement::Shapes(placed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{bounding_box, Geometry};
    use crate::symbol::{BitmapSymbol, VectorSymbol};
    use rgb::RGBA8;

    fn unit_vector_symbol() -> Symbol {
        // One rect spanning the full unit box.
        Symbol::Vector(VectorSymbol {
            shapes: vec![Shape::new(Geometry::Rect {
                start: Point::new(0.0, 0.0),
                end: Point::new(1.0, 1.0),
            })],
            original_width: 0.1,
            original_height: 0.05,
            aspect_ratio: 2.0,
        })
    }

    #[test]
    fn test_invalid_scale_rejected() {
        let symbol = unit_vector_symbol();
        let settings = PlacementSettings {
            scale: 0.0,
            ..PlacementSettings::default()
        };
        assert!(matches!(
            place(&symbol, 1, Point::new(0.5, 0.5), &settings),
            Err(EngineError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_decomposed_bounds_scenario() {
        // originalWidth=0.1, originalHeight=0.05, center (0.5,0.5),
        // scale 2 -> bounding box [0.4,0.6] x [0.45,0.55].
        let symbol = unit_vector_symbol();
        let settings = PlacementSettings {
            scale: 2.0,
            ..PlacementSettings::default()
        };
        let placement = place(&symbol, 1, Point::new(0.5, 0.5), &settings).unwrap();
        let shapes: Vec<Shape> = match placement {
            Placement::Shapes(placed) => placed.into_iter().map(|p| p.shape).collect(),
            _ => panic!("expected decomposed shapes"),
        };
        let (min, max) = bounding_box(&shapes).unwrap();
        assert!((min.x - 0.4).abs() < 1e-12);
        assert!((max.x - 0.6).abs() < 1e-12);
        assert!((min.y - 0.45).abs() < 1e-12);
        assert!((max.y - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_is_additive_and_color_overrides() {
        let mut symbol = unit_vector_symbol();
        if let Symbol::Vector(v) = &mut symbol {
            v.shapes[0].rotation = 15.0;
        }
        let settings = PlacementSettings {
            rotation: 30.0,
            color_override: Some(Color::new(200, 0, 0)),
            stroke_width_override: Some(3.0),
            ..PlacementSettings::default()
        };
        let placement = place(&symbol, 9, Point::new(0.5, 0.5), &settings).unwrap();
        match placement {
            Placement::Shapes(placed) => {
                assert_eq!(placed[0].source_symbol, 9);
                assert_eq!(placed[0].shape.rotation, 45.0);
                assert_eq!(placed[0].shape.style.color, Color::new(200, 0, 0));
                assert_eq!(placed[0].shape.style.stroke_width, 3.0);
            }
            _ => panic!("expected decomposed shapes"),
        }
    }

    #[test]
    fn test_color_preserved_without_override() {
        let symbol = unit_vector_symbol();
        let placement = place(
            &symbol,
            1,
            Point::new(0.5, 0.5),
            &PlacementSettings::default(),
        )
        .unwrap();
        match placement {
            Placement::Shapes(placed) => {
                assert_eq!(placed[0].shape.style.color, Color::BLACK);
            }
            _ => panic!("expected decomposed shapes"),
        }
    }

    #[test]
    fn test_grouped_placement_references_symbol() {
        let symbol = unit_vector_symbol();
        let settings = PlacementSettings {
            decompose: false,
            scale: 1.5,
            rotation: 90.0,
            ..PlacementSettings::default()
        };
        let placement = place(&symbol, 42, Point::new(0.3, 0.7), &settings).unwrap();
        match placement {
            Placement::Group(group) => {
                assert_eq!(group.symbol, 42);
                assert_eq!(group.center, Point::new(0.3, 0.7));
                assert_eq!(group.scale, 1.5);
                assert_eq!(group.rotation, 90.0);
            }
            _ => panic!("expected grouped placement"),
        }
    }

    #[test]
    fn test_bitmap_placement_bounds_and_recolor() {
        let pixels = vec![
            RGBA8::new(0, 0, 0, 255),
            RGBA8::new(230, 230, 230, 255),
        ];
        let raster = RasterBuffer::from_pixels(2, 1, pixels).unwrap();
        let symbol = Symbol::Bitmap(BitmapSymbol {
            raster,
            original_width: 0.2,
            original_height: 0.1,
        });
        let settings = PlacementSettings {
            scale: 0.5,
            color_override: Some(Color::new(0, 0, 255)),
            ..PlacementSettings::default()
        };
        let placement = place(&symbol, 3, Point::new(0.5, 0.5), &settings).unwrap();
        match placement {
            Placement::Raster(placed) => {
                assert!((placed.bounds.width - 0.1).abs() < 1e-12);
                assert!((placed.bounds.height - 0.05).abs() < 1e-12);
                assert!((placed.bounds.x - 0.45).abs() < 1e-12);
                assert!((placed.bounds.y - 0.475).abs() < 1e-12);
                // Ink pixel took the override; near-white went transparent.
                let ink = placed.raster.get(0, 0);
                assert_eq!((ink.r, ink.g, ink.b, ink.a), (0, 0, 255, 255));
                assert_eq!(placed.raster.get(1, 0).a, 0);
            }
            _ => panic!("expected raster placement"),
        }
    }

    #[test]
    fn test_bitmap_symbol_untouched_by_placement() {
        let raster =
            RasterBuffer::from_pixels(1, 1, vec![RGBA8::new(0, 0, 0, 255)]).unwrap();
        let symbol = Symbol::Bitmap(BitmapSymbol {
            raster: raster.clone(),
            original_width: 0.1,
            original_height: 0.1,
        });
        let settings = PlacementSettings {
            color_override: Some(Color::new(255, 0, 0)),
            ..PlacementSettings::default()
        };
        place(&symbol, 1, Point::new(0.5, 0.5), &settings).unwrap();
        match &symbol {
            Symbol::Bitmap(b) => assert_eq!(b.raster, raster),
            _ => unreachable!(),
        }
    }
}
