use thiserror::Error;

/// Errors surfaced by the capture/edit/place pipeline.
///
/// Batch pixel operations are total and never appear here; only the
/// operations that can genuinely refuse to proceed do.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The host page-rendering facility could not produce a surface.
    /// No partial buffer is produced; the caller must not proceed to editing.
    #[error("page {page_index} could not be rasterized: {reason}")]
    RenderFailure { page_index: usize, reason: String },

    /// Vector symbol build was given no shapes.
    #[error("cannot build a symbol from an empty shape set")]
    EmptyShapeSet,

    /// The shape set collapses to a zero-width or zero-height bounding box.
    #[error("degenerate bounding box ({width} x {height})")]
    DegenerateBoundingBox { width: f64, height: f64 },

    /// A stored symbol record did not decode into a known kind.
    #[error("unsupported symbol kind: {0}")]
    UnsupportedSymbolKind(String),

    /// Placement requires a strictly positive scale.
    #[error("invalid placement scale {0} (must be > 0)")]
    InvalidScale(f64),

    /// A zero-size raster was offered for editing or produced by a crop.
    #[error("empty raster buffer ({width} x {height})")]
    EmptyBuffer { width: u32, height: u32 },

    /// Brush operations require a strictly positive radius.
    #[error("invalid brush radius {0} (must be > 0)")]
    InvalidBrushRadius(f64),
}

pub type Result<T> = std::result::Result<T, EngineError>;
