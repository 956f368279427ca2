//! Interactive pixel cleanup of a captured region.
//!
//! An [`EditSession`] owns the working raster, an immutable snapshot of
//! the capture for restore/reset, and the selection's page-fraction
//! dimensions. Brush operations touch only the brush's circular
//! footprint; batch operations scan the whole buffer once and are total
//! (they cannot fail once the session exists).

use crate::capture::CapturedRegion;
use crate::components::label_components;
use crate::error::{EngineError, Result};
use crate::raster::{gray, RasterBuffer};
use crate::shape::{Color, Point};
use log::debug;
use rayon::prelude::*;
use rgb::RGBA8;

/// Session configuration, passed in explicitly rather than read from
/// any process-wide state. The gray cutoff used by threshold/recolor
/// and the background tolerance are deliberately independent knobs.
#[derive(Debug, Clone, Copy)]
pub struct EditorConfig {
    /// Brush radius in buffer pixels for erase/restore/fill.
    pub brush_radius: f64,
    /// Channel floor above which a pixel counts as background (remove_background).
    pub background_tolerance: u8,
    /// Gray level separating ink from paper (threshold default, recolor mask).
    pub ink_gray_cutoff: u32,
    /// Minimum connected-blob size kept by remove_specks.
    pub speck_min_size: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            brush_radius: 8.0,
            background_tolerance: 240,
            ink_gray_cutoff: 200,
            speck_min_size: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushTool {
    Erase,
    Restore,
    Fill(Color),
}

/// Drag state for interactive strokes. A stroke is a sequence of brush
/// applications between `begin_stroke` and `end_stroke`; cancelling
/// just stops applying (brush sub-ops already mutated in place and are
/// not transactional).
#[derive(Debug, Clone, Copy, PartialEq)]
enum StrokeState {
    Idle,
    Dragging(BrushTool),
}

pub struct EditSession {
    raster: RasterBuffer,
    original: RasterBuffer,
    normalized_width: f64,
    normalized_height: f64,
    config: EditorConfig,
    stroke: StrokeState,
}

impl EditSession {
    pub fn new(region: CapturedRegion, config: EditorConfig) -> Result<Self> {
        if config.brush_radius <= 0.0 {
            return Err(EngineError::InvalidBrushRadius(config.brush_radius));
        }
        let original = region.raster.clone();
        Ok(EditSession {
            raster: region.raster,
            original,
            normalized_width: region.normalized_width,
            normalized_height: region.normalized_height,
            config,
            stroke: StrokeState::Idle,
        })
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    pub fn normalized_width(&self) -> f64 {
        self.normalized_width
    }

    pub fn normalized_height(&self) -> f64 {
        self.normalized_height
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ----- brush stroke state machine -----

    pub fn begin_stroke(&mut self, tool: BrushTool) {
        self.stroke = StrokeState::Dragging(tool);
    }

    /// Apply the active stroke's tool at `point`. No-op while idle.
    pub fn apply(&mut self, point: Point) {
        if let StrokeState::Dragging(tool) = self.stroke {
            let radius = self.config.brush_radius;
            match tool {
                BrushTool::Erase => self.erase(point, radius),
                BrushTool::Restore => self.restore(point, radius),
                BrushTool::Fill(color) => self.fill(point, radius, color),
            }
        }
    }

    pub fn end_stroke(&mut self) {
        self.stroke = StrokeState::Idle;
    }

    /// Stop the drag without any further effect. Already-applied brush
    /// sub-ops stay; there is nothing to roll back.
    pub fn cancel_stroke(&mut self) {
        self.stroke = StrokeState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.stroke, StrokeState::Dragging(_))
    }

    // ----- brush operations (bounded to the brush footprint) -----

    /// Set alpha to 0 inside the circle of `radius` around `point`.
    pub fn erase(&mut self, point: Point, radius: f64) {
        for_each_in_brush(&mut self.raster, point, radius, |p, _| {
            p.a = 0;
        });
    }

    /// Copy original snapshot pixels back into the circle.
    pub fn restore(&mut self, point: Point, radius: f64) {
        let original = &self.original;
        for_each_in_brush(&mut self.raster, point, radius, |p, idx| {
            *p = original.pixels()[idx];
        });
    }

    /// Paint solid opaque `color` into the circle.
    pub fn fill(&mut self, point: Point, radius: f64, color: Color) {
        for_each_in_brush(&mut self.raster, point, radius, |p, _| {
            *p = RGBA8::new(color.r, color.g, color.b, 255);
        });
    }

    // ----- batch operations (whole buffer, deterministic, total) -----

    /// Strip near-white background: any pixel whose R, G and B all
    /// exceed the tolerance goes fully transparent.
    pub fn remove_background(&mut self, tolerance: u8) {
        self.raster.pixels_mut().par_iter_mut().for_each(|p| {
            if p.r > tolerance && p.g > tolerance && p.b > tolerance {
                p.a = 0;
            }
        });
        debug!("remove_background tolerance={tolerance}");
    }

    /// Binarize into ink vs transparent: gray above `limit` is removed,
    /// everything else becomes fully opaque black.
    pub fn threshold(&mut self, limit: u32) {
        self.raster.pixels_mut().par_iter_mut().for_each(|p| {
            if gray(*p) > limit {
                p.a = 0;
            } else {
                *p = RGBA8::new(0, 0, 0, 255);
            }
        });
        debug!("threshold limit={limit}");
    }

    /// Zero the alpha of every connected ink blob smaller than
    /// `min_size` pixels. 4-connectivity; see [`crate::components`].
    pub fn remove_specks(&mut self, min_size: usize) {
        let map = label_components(&self.raster);
        let removed: usize = map
            .sizes
            .iter()
            .filter(|&&s| s < min_size)
            .count();
        let labels = &map.labels;
        let sizes = &map.sizes;
        self.raster
            .pixels_mut()
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, p)| {
                let label = labels[idx];
                if label != 0 && sizes[(label - 1) as usize] < min_size {
                    p.a = 0;
                }
            });
        debug!(
            "remove_specks min_size={min_size}: dropped {removed} of {} blobs",
            sizes.len()
        );
    }

    /// Treat the buffer as an alpha-masked single-color stencil:
    /// dark pixels take `new_color` with alpha proportional to their
    /// darkness, near-white pixels go transparent.
    pub fn recolor(&mut self, new_color: Color) {
        let cutoff = self.config.ink_gray_cutoff;
        recolor_buffer(&mut self.raster, new_color, cutoff);
    }

    /// Invert RGB of every visible pixel; alpha untouched.
    pub fn invert(&mut self) {
        self.raster.pixels_mut().par_iter_mut().for_each(|p| {
            if p.a > 0 {
                p.r = 255 - p.r;
                p.g = 255 - p.g;
                p.b = 255 - p.b;
            }
        });
    }

    /// Crop to the tight bounding box of visible pixels and rescale the
    /// normalized dimensions by the crop ratio, so page-fraction sizing
    /// stays consistent. No-op on a fully transparent buffer.
    pub fn trim(&mut self) {
        let Some((min_x, min_y, max_x, max_y)) = visible_bounds(&self.raster) else {
            return;
        };
        let trim_w = max_x - min_x + 1;
        let trim_h = max_y - min_y + 1;
        if trim_w == self.raster.width() && trim_h == self.raster.height() {
            return;
        }

        let old_w = self.raster.width() as f64;
        let old_h = self.raster.height() as f64;
        // Full-buffer crop can't fail: the box lies inside the raster.
        if let Ok(cropped) = self.raster.crop(min_x, min_y, trim_w, trim_h) {
            self.raster = cropped;
            self.normalized_width *= trim_w as f64 / old_w;
            self.normalized_height *= trim_h as f64 / old_h;
            debug!("trimmed to {trim_w}x{trim_h}");
        }
    }

    /// Restore the whole buffer from the capture-time snapshot.
    pub fn reset(&mut self) {
        self.raster = self.original.clone();
    }

    /// Consume the session into its current raster and page-fraction size.
    pub fn into_parts(self) -> (RasterBuffer, f64, f64) {
        (self.raster, self.normalized_width, self.normalized_height)
    }
}

/// Visit every pixel inside the circular brush footprint, clamped to
/// buffer bounds. The closure also receives the flat pixel index so
/// restore can address the snapshot.
fn for_each_in_brush<F>(raster: &mut RasterBuffer, center: Point, radius: f64, mut f: F)
where
    F: FnMut(&mut RGBA8, usize),
{
    let w = raster.width() as i64;
    let h = raster.height() as i64;
    let r = radius.max(0.0);
    let r_sq = r * r;

    let x_min = ((center.x - r).floor() as i64).max(0);
    let x_max = ((center.x + r).ceil() as i64).min(w - 1);
    let y_min = ((center.y - r).floor() as i64).max(0);
    let y_max = ((center.y + r).ceil() as i64).min(h - 1);

    let pixels = raster.pixels_mut();
    for y in y_min..=y_max {
        let row = y as usize * w as usize;
        for x in x_min..=x_max {
            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            if dx * dx + dy * dy <= r_sq {
                let idx = row + x as usize;
                f(&mut pixels[idx], idx);
            }
        }
    }
}

/// Recolor transform shared with bitmap placement (color override).
pub fn recolor_buffer(raster: &mut RasterBuffer, new_color: Color, gray_cutoff: u32) {
    raster.pixels_mut().par_iter_mut().for_each(|p| {
        if p.a <= 10 {
            return;
        }
        let g = gray(*p);
        if g < gray_cutoff {
            let darkness = 1.0 - g as f64 / gray_cutoff as f64;
            *p = RGBA8::new(
                new_color.r,
                new_color.g,
                new_color.b,
                (255.0 * darkness).round() as u8,
            );
        } else {
            p.a = 0;
        }
    });
}

fn visible_bounds(raster: &RasterBuffer) -> Option<(u32, u32, u32, u32)> {
    let w = raster.width();
    let h = raster.height();
    let pixels = raster.pixels();
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut any = false;

    for y in 0..h {
        let row = y as usize * w as usize;
        for x in 0..w {
            if pixels[row + x as usize].a > 0 {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                any = true;
            }
        }
    }

    any.then_some((min_x, min_y, max_x, max_y))
}
