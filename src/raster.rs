use crate::error::{EngineError, Result};
use rgb::RGBA8;
use serde::{Deserialize, Serialize};

/// An addressable RGBA pixel grid. All editing operations read and
/// mutate it in place through an exclusive reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RasterRepr", try_from = "RasterRepr")]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<RGBA8>,
}

/// Serde wire form: flat RGBA bytes, row-major.
#[derive(Serialize, Deserialize)]
struct RasterRepr {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl From<RasterBuffer> for RasterRepr {
    fn from(buf: RasterBuffer) -> Self {
        let mut data = Vec::with_capacity(buf.pixels.len() * 4);
        for p in &buf.pixels {
            data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        RasterRepr {
            width: buf.width,
            height: buf.height,
            data,
        }
    }
}

impl TryFrom<RasterRepr> for RasterBuffer {
    type Error = String;

    fn try_from(repr: RasterRepr) -> std::result::Result<Self, String> {
        let expected = repr.width as usize * repr.height as usize * 4;
        if repr.data.len() != expected {
            return Err(format!(
                "raster data length {} does not match {}x{}",
                repr.data.len(),
                repr.width,
                repr.height
            ));
        }
        let pixels = repr
            .data
            .chunks_exact(4)
            .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(RasterBuffer {
            width: repr.width,
            height: repr.height,
            pixels,
        })
    }
}

impl RasterBuffer {
    /// Create a fully transparent buffer. Rejects zero-size dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::EmptyBuffer { width, height });
        }
        Ok(RasterBuffer {
            width,
            height,
            pixels: vec![RGBA8::new(0, 0, 0, 0); width as usize * height as usize],
        })
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<RGBA8>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return Err(EngineError::EmptyBuffer { width, height });
        }
        Ok(RasterBuffer {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[RGBA8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [RGBA8] {
        &mut self.pixels
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> RGBA8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: RGBA8) {
        self.pixels[y as usize * self.width as usize + x as usize] = pixel;
    }

    /// Copy a sub-rectangle into a new buffer. The rectangle must lie
    /// fully inside this buffer and must not be empty.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<RasterBuffer> {
        if width == 0
            || height == 0
            || x.checked_add(width).map_or(true, |r| r > self.width)
            || y.checked_add(height).map_or(true, |b| b > self.height)
        {
            return Err(EngineError::EmptyBuffer { width, height });
        }
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in y..y + height {
            let start = row as usize * self.width as usize + x as usize;
            pixels.extend_from_slice(&self.pixels[start..start + width as usize]);
        }
        Ok(RasterBuffer {
            width,
            height,
            pixels,
        })
    }
}

/// Mean of the RGB channels. The ink/background decisions in the editor
/// all run off this single definition of gray.
#[inline]
pub fn gray(p: RGBA8) -> u32 {
    (p.r as u32 + p.g as u32 + p.b as u32) / 3
}

/// Load a PNG (or any format the `image` crate recognizes) as a raster.
pub fn load_raster(path: &std::path::Path) -> anyhow::Result<RasterBuffer> {
    let img = image::open(path)?;
    let rgba = img.to_rgba8();
    let pixels: Vec<RGBA8> = rgba
        .pixels()
        .map(|p| RGBA8::new(p[0], p[1], p[2], p[3]))
        .collect();
    Ok(RasterBuffer::from_pixels(rgba.width(), rgba.height(), pixels)?)
}

/// Save a raster as a PNG.
pub fn save_raster(buf: &RasterBuffer, path: &std::path::Path) -> anyhow::Result<()> {
    let mut data = Vec::with_capacity(buf.pixels().len() * 4);
    for p in buf.pixels() {
        data.extend_from_slice(&[p.r, p.g, p.b, p.a]);
    }
    let img: image::RgbaImage = image::ImageBuffer::from_raw(buf.width(), buf.height(), data)
        .ok_or_else(|| anyhow::anyhow!("raster dimensions do not match pixel data"))?;
    img.save(path)?;
    Ok(())
}
