use clap::Parser;
use std::path::PathBuf;
use symcap::capture::NormRect;

#[derive(Parser)]
#[command(name = "symcap")]
#[command(about = "Capture a page region and clean it into a reusable symbol")]
#[command(version)]
pub struct Cli {
    /// Input page image (PNG)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Selection rectangle as x,y,w,h in page-normalized 0..1 units
    #[arg(short, long)]
    pub rect: String,

    /// Output symbol PNG
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the symbol record as JSON
    #[arg(short, long)]
    pub json: Option<PathBuf>,

    /// Capture supersampling factor (default: 3)
    #[arg(short = 's', long, default_value = "3")]
    pub supersample: u32,

    /// Strip near-white background above this tolerance (0-255)
    #[arg(short, long)]
    pub background: Option<u8>,

    /// Binarize into ink vs transparent at this gray limit (0-255)
    #[arg(short, long)]
    pub threshold: Option<u32>,

    /// Remove connected ink blobs smaller than this pixel count
    #[arg(short = 'm', long)]
    pub min_speck: Option<usize>,

    /// Recolor ink to this hex color (e.g. #cc0000)
    #[arg(short = 'c', long)]
    pub recolor: Option<String>,

    /// Invert the RGB of visible pixels
    #[arg(long)]
    pub invert: bool,

    /// Keep the full selection instead of trimming to visible ink
    #[arg(long)]
    pub no_trim: bool,
}

/// Parse "x,y,w,h" into a normalized selection rectangle.
pub fn parse_rect(s: &str) -> anyhow::Result<NormRect> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()?;
    if parts.len() != 4 {
        anyhow::bail!("expected 4 comma-separated values, got {}", parts.len());
    }
    let rect = NormRect {
        x: parts[0],
        y: parts[1],
        width: parts[2],
        height: parts[3],
    };
    if !(0.0..=1.0).contains(&rect.x)
        || !(0.0..=1.0).contains(&rect.y)
        || rect.width <= 0.0
        || rect.height <= 0.0
        || rect.x + rect.width > 1.0
        || rect.y + rect.height > 1.0
    {
        anyhow::bail!("rectangle must lie within the 0..1 page: {s}");
    }
    Ok(rect)
}
