//! symcap - symbol capture, segmentation, and placement engine
//!
//! The core of a drawing-annotation application: capture a region of a
//! rendered page into an RGBA raster, clean it up into a reusable
//! symbol with brush and batch pixel operations (including
//! connected-component speck removal), or build a symbol from authored
//! vector shapes, then place stored symbols back onto pages with
//! scale/rotation/color transforms.
//!
//! ## Features
//!
//! - **Supersampled region capture** through a host [`capture::PageRenderer`]
//! - **Pixel cleanup**: brush erase/restore/fill, background removal,
//!   thresholding, flood-fill speck removal, recolor, invert, trim
//! - **Vector symbols** with unit-box normalization and
//!   **Ramer-Douglas-Peucker** polyline simplification
//! - **Placement** as a grouped reference or decomposed primitives
//!
//! ## Example
//!
//! ```rust,ignore
//! use symcap::{capture_symbol, CleanupOptions};
//! use symcap::capture::{CaptureOptions, NormRect};
//! use symcap::editor::EditorConfig;
//!
//! let selection = NormRect { x: 0.1, y: 0.1, width: 0.2, height: 0.1 };
//! let symbol = capture_symbol(
//!     &renderer,
//!     0,
//!     selection,
//!     &CaptureOptions::default(),
//!     EditorConfig::default(),
//!     &CleanupOptions::default(),
//! )?;
//! ```

pub mod builder;
pub mod capture;
pub mod components;
pub mod editor;
pub mod error;
pub mod placement;
pub mod preview;
pub mod raster;
pub mod shape;
pub mod simplify;
pub mod symbol;

pub use builder::build_vector_symbol;
pub use capture::{capture_region, CaptureOptions, CapturedRegion, NormRect, PageRenderer};
pub use editor::{BrushTool, EditSession, EditorConfig};
pub use error::{EngineError, Result};
pub use placement::{place, Placement, PlacementSettings};
pub use raster::RasterBuffer;
pub use shape::{Color, Geometry, Point, Shape, Style};
pub use symbol::{BitmapSymbol, MemoryStore, Symbol, SymbolStore, VectorSymbol};

/// The standard batch cleanup chain applied after a capture.
#[derive(Debug, Clone, Default)]
pub struct CleanupOptions {
    /// Strip near-white background above this channel tolerance.
    pub remove_background: Option<u8>,
    /// Binarize into ink vs transparent at this gray limit.
    pub threshold: Option<u32>,
    /// Drop connected ink blobs smaller than this pixel count.
    pub remove_specks: Option<usize>,
    /// Replace ink color, alpha-masked by darkness.
    pub recolor: Option<Color>,
    pub invert: bool,
    /// Crop to visible ink and rescale the page-fraction size.
    pub trim: bool,
}

impl CleanupOptions {
    /// The usual "scan cleanup" chain: strip background, drop specks, trim.
    pub fn scan(config: &EditorConfig) -> Self {
        CleanupOptions {
            remove_background: Some(config.background_tolerance),
            remove_specks: Some(config.speck_min_size),
            trim: true,
            ..CleanupOptions::default()
        }
    }
}

/// Capture a page region and run the batch cleanup chain, producing an
/// immutable bitmap symbol. Interactive brush editing goes through
/// [`EditSession`] directly instead.
pub fn capture_symbol<R: PageRenderer>(
    renderer: &R,
    page_index: usize,
    selection: NormRect,
    capture_options: &CaptureOptions,
    editor_config: EditorConfig,
    cleanup: &CleanupOptions,
) -> Result<BitmapSymbol> {
    let region = capture_region(renderer, page_index, selection, capture_options)?;
    let mut session = EditSession::new(region, editor_config)?;

    if let Some(tolerance) = cleanup.remove_background {
        session.remove_background(tolerance);
    }
    if let Some(limit) = cleanup.threshold {
        session.threshold(limit);
    }
    if let Some(min_size) = cleanup.remove_specks {
        session.remove_specks(min_size);
    }
    if let Some(color) = cleanup.recolor {
        session.recolor(color);
    }
    if cleanup.invert {
        session.invert();
    }
    if cleanup.trim {
        session.trim();
    }

    let (raster, normalized_width, normalized_height) = session.into_parts();
    Ok(BitmapSymbol {
        raster,
        original_width: normalized_width,
        original_height: normalized_height,
    })
}
