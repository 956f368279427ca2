//! Region capture: rasterize a normalized page selection into a buffer.

use crate::error::{EngineError, Result};
use crate::raster::RasterBuffer;
use log::debug;

/// Host-provided page rendering facility. Asked for the full page at an
/// explicit pixel resolution; may fail if the page cannot be rasterized.
pub trait PageRenderer {
    fn render_page(&self, page_index: usize, width: u32, height: u32) -> Result<RasterBuffer>;
}

/// A selection rectangle in page-normalized coordinates, each axis 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CaptureOptions {
    /// Nominal display resolution of the page, in pixels.
    pub display_width: u32,
    pub display_height: u32,
    /// Ratio of capture resolution to display resolution.
    pub supersample: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptions {
            display_width: 800,
            display_height: 1100,
            supersample: 3,
        }
    }
}

/// The editing-session input produced by a capture. The normalized
/// dimensions are the selection's, preserved verbatim, so page-fraction
/// sizing stays exact through later scaling.
#[derive(Debug, Clone)]
pub struct CapturedRegion {
    pub raster: RasterBuffer,
    pub normalized_width: f64,
    pub normalized_height: f64,
}

/// Render `page_index` at supersampled resolution and crop out the
/// selection. Fails with `RenderFailure` if the page cannot be rendered
/// and produces no buffer in that case.
pub fn capture_region<R: PageRenderer>(
    renderer: &R,
    page_index: usize,
    selection: NormRect,
    options: &CaptureOptions,
) -> Result<CapturedRegion> {
    let render_w = options.display_width * options.supersample.max(1);
    let render_h = options.display_height * options.supersample.max(1);

    let page = renderer.render_page(page_index, render_w, render_h)?;

    let px = (selection.x * page.width() as f64).floor().max(0.0) as u32;
    let py = (selection.y * page.height() as f64).floor().max(0.0) as u32;
    let pw = (selection.width * page.width() as f64).round() as u32;
    let ph = (selection.height * page.height() as f64).round() as u32;

    let pw = pw.min(page.width().saturating_sub(px));
    let ph = ph.min(page.height().saturating_sub(py));
    if pw == 0 || ph == 0 {
        return Err(EngineError::EmptyBuffer {
            width: pw,
            height: ph,
        });
    }

    debug!(
        "captured page {page_index} rect {px},{py} {pw}x{ph} at {}x supersampling",
        options.supersample
    );

    let raster = page.crop(px, py, pw, ph)?;
    Ok(CapturedRegion {
        raster,
        normalized_width: selection.width,
        normalized_height: selection.height,
    })
}
