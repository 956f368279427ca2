//! Connected-component labeling over the ink mask of a raster.
//!
//! Used by speck removal: label every 4-connected blob of foreground
//! pixels, then drop the blobs below the size threshold.

use crate::raster::{gray, RasterBuffer};
use rgb::RGBA8;
use std::collections::VecDeque;

pub const NO_LABEL: u32 = 0;

/// Per-pixel labels plus the pixel count of each label. Label 0 is
/// background; real labels start at 1 and index `sizes` at `label - 1`.
#[derive(Debug)]
pub struct LabelMap {
    pub labels: Vec<u32>,
    pub sizes: Vec<usize>,
}

impl LabelMap {
    pub fn size_of(&self, label: u32) -> usize {
        if label == NO_LABEL {
            0
        } else {
            self.sizes[(label - 1) as usize]
        }
    }
}

/// A pixel counts as foreground ink when it is mostly opaque and dark.
#[inline]
pub fn is_foreground(p: RGBA8) -> bool {
    p.a > 128 && gray(p) < 200
}

/// Label the 4-connected foreground components of `raster`.
///
/// Breadth-first flood fill with an explicit queue; never recurses
/// per pixel, so large regions cannot overflow the stack.
/// O(W*H) time and auxiliary space.
pub fn label_components(raster: &RasterBuffer) -> LabelMap {
    label_components_with(raster, is_foreground)
}

pub fn label_components_with<F>(raster: &RasterBuffer, foreground: F) -> LabelMap
where
    F: Fn(RGBA8) -> bool,
{
    let w = raster.width() as usize;
    let h = raster.height() as usize;
    let iw = raster.width() as i32;
    let ih = raster.height() as i32;
    let pixels = raster.pixels();

    let mut labels = vec![NO_LABEL; w * h];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..h {
        let row = y * w;
        for x in 0..w {
            let idx = row + x;
            if labels[idx] != NO_LABEL || !foreground(pixels[idx]) {
                continue;
            }

            let label = sizes.len() as u32 + 1;
            let mut count = 0usize;
            labels[idx] = label;
            queue.push_back((x as i32, y as i32));

            while let Some((cx, cy)) = queue.pop_front() {
                count += 1;
                for (dx, dy) in [(0i32, 1i32), (1, 0), (0, -1), (-1, 0)] {
                    let nx = cx + dx;
                    let ny = cy + dy;
                    if nx >= 0 && nx < iw && ny >= 0 && ny < ih {
                        let nidx = ny as usize * w + nx as usize;
                        if labels[nidx] == NO_LABEL && foreground(pixels[nidx]) {
                            labels[nidx] = label;
                            queue.push_back((nx, ny));
                        }
                    }
                }
            }

            sizes.push(count);
        }
    }

    LabelMap { labels, sizes }
}
