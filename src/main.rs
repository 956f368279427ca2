mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;
use rgb::RGBA8;
use symcap::capture::{CaptureOptions, PageRenderer};
use symcap::raster::{load_raster, save_raster, RasterBuffer};
use symcap::shape::Color;
use symcap::symbol::Symbol;
use symcap::{capture_symbol, CleanupOptions, EditorConfig};

/// Treats a single image file as the rendered page: the host
/// page-rendering facility, approximated by resampling the image to the
/// requested resolution.
struct ImagePageRenderer {
    image: image::RgbaImage,
}

impl ImagePageRenderer {
    fn open(path: &std::path::Path) -> Result<Self> {
        let raster = load_raster(path)?;
        let mut data = Vec::with_capacity(raster.pixels().len() * 4);
        for p in raster.pixels() {
            data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        let image = image::RgbaImage::from_raw(raster.width(), raster.height(), data)
            .ok_or_else(|| anyhow::anyhow!("could not decode page image"))?;
        Ok(ImagePageRenderer { image })
    }
}

impl PageRenderer for ImagePageRenderer {
    fn render_page(
        &self,
        _page_index: usize,
        width: u32,
        height: u32,
    ) -> symcap::Result<RasterBuffer> {
        let resized = image::imageops::resize(
            &self.image,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        let pixels: Vec<RGBA8> = resized
            .pixels()
            .map(|p| RGBA8::new(p[0], p[1], p[2], p[3]))
            .collect();
        RasterBuffer::from_pixels(width, height, pixels)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let selection = cli::parse_rect(&cli.rect)?;
    let recolor = cli
        .recolor
        .as_deref()
        .map(|s| {
            Color::parse_hex(s).ok_or_else(|| anyhow::anyhow!("invalid hex color: {s}"))
        })
        .transpose()?;

    let output = cli.output.unwrap_or_else(|| {
        let mut path = cli.input.clone();
        path.set_extension("symbol.png");
        path
    });

    let renderer = ImagePageRenderer::open(&cli.input)?;
    let config = EditorConfig::default();
    let cleanup = CleanupOptions {
        remove_background: cli.background,
        threshold: cli.threshold,
        remove_specks: cli.min_speck,
        recolor,
        invert: cli.invert,
        trim: !cli.no_trim,
    };

    let capture_options = CaptureOptions {
        display_width: renderer.image.width(),
        display_height: renderer.image.height(),
        supersample: cli.supersample,
    };

    info!(
        "capturing {:?} from {} at {}x supersampling",
        selection,
        cli.input.display(),
        cli.supersample
    );

    let bitmap = capture_symbol(
        &renderer,
        0,
        selection,
        &capture_options,
        config,
        &cleanup,
    )?;

    save_raster(&bitmap.raster, &output)?;
    info!(
        "wrote {} ({}x{}, {:.4}x{:.4} of page)",
        output.display(),
        bitmap.raster.width(),
        bitmap.raster.height(),
        bitmap.original_width,
        bitmap.original_height
    );

    if let Some(json_path) = cli.json {
        let symbol = Symbol::Bitmap(bitmap);
        std::fs::write(&json_path, symbol.to_json()?)?;
        info!("wrote symbol record {}", json_path.display());
    }

    Ok(())
}
