use crate::effects::composite::{CompositeOp, composite_in_place, destination_in_in_place};
use crate::foundation::core::{Canvas, PixelRect, Rgba8Premul};
use crate::foundation::error::{GlazeError, GlazeResult};

/// A premultiplied RGBA8 pixel buffer.
///
/// The preview output is one long-lived `Surface`; every intermediate layer of a render pass is
/// a short-lived `Surface` of the same dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, premultiplied, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; canvas.pixel_count() * 4],
        }
    }

    /// Surface filled with one premultiplied color.
    pub fn filled(canvas: Canvas, px: Rgba8Premul) -> Self {
        let mut s = Self::new(canvas);
        s.fill(px);
        s
    }

    /// Wrap premultiplied bytes, validating the length.
    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> GlazeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GlazeError::validation("surface size overflow"))?;
        if data.len() != expected {
            return Err(GlazeError::validation(
                "surface bytes must match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Overwrite every pixel with `px`.
    pub fn fill(&mut self, px: Rgba8Premul) {
        let px = px.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Pixel at `(x, y)`; out-of-bounds reads are transparent.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Alpha channel as one byte per pixel.
    pub fn alpha(&self) -> Vec<u8> {
        self.data.chunks_exact(4).map(|px| px[3]).collect()
    }

    /// Composite `src` (same dimensions) onto this surface.
    pub fn draw(&mut self, src: &Surface, op: CompositeOp, opacity: f32) {
        debug_assert_eq!(self.canvas(), src.canvas());
        composite_in_place(&mut self.data, &src.data, op, opacity);
    }

    /// Keep this surface only where `mask` has coverage, weighted by it.
    pub fn mask_in(&mut self, mask: &Silhouette) {
        debug_assert_eq!(self.canvas(), mask.canvas());
        destination_in_in_place(&mut self.data, &mask.alpha);
    }

    /// Copy `src` into this surface with its top-left corner at `(x, y)`, clipping at the edges.
    pub fn blit(&mut self, src: &Surface, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cols = src.width.min(self.width - x) as usize;
        let rows = src.height.min(self.height - y);
        for row in 0..rows {
            let s = (row as usize) * (src.width as usize) * 4;
            let d = (((y + row) as usize) * (self.width as usize) + x as usize) * 4;
            self.data[d..d + cols * 4].copy_from_slice(&src.data[s..s + cols * 4]);
        }
    }

    /// Straight-alpha RGBA8 copy, for encoders that expect unassociated alpha.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
                continue;
            }
            for c in 0..3 {
                px[c] = ((u32::from(px[c]) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// An 8-bit coverage mask with the same dimensions as the output surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Silhouette {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// One coverage byte per pixel, row-major.
    pub alpha: Vec<u8>,
}

impl Silhouette {
    /// Mask with no coverage.
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            alpha: vec![0u8; canvas.pixel_count()],
        }
    }

    /// Wrap coverage bytes, validating the length.
    pub fn from_alpha(width: u32, height: u32, alpha: Vec<u8>) -> GlazeResult<Self> {
        if alpha.len() != (width as usize).saturating_mul(height as usize) {
            return Err(GlazeError::validation(
                "silhouette bytes must match width*height",
            ));
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Mask taken from the alpha channel of a surface.
    pub fn from_surface(surface: &Surface) -> Self {
        Self {
            width: surface.width,
            height: surface.height,
            alpha: surface.alpha(),
        }
    }

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Coverage at `(x, y)`; out-of-bounds reads are 0.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Number of pixels with nonzero coverage.
    pub fn covered_pixels(&self) -> usize {
        self.alpha.iter().filter(|&&a| a != 0).count()
    }

    /// Tight bounds of the covered region, if any.
    pub fn bounds(&self) -> Option<PixelRect> {
        let w = self.width as usize;
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0usize;
        let mut max_y = 0usize;
        for (i, &a) in self.alpha.iter().enumerate() {
            if a == 0 {
                continue;
            }
            let (x, y) = (i % w, i / w);
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if min_x == usize::MAX {
            return None;
        }
        Some(PixelRect {
            x: min_x as i32,
            y: min_y as i32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    /// A layer of `px` shaped by this mask (coverage scales every channel).
    pub fn tint(&self, px: Rgba8Premul) -> Surface {
        let mut s = Surface::filled(self.canvas(), px);
        s.mask_in(self);
        s
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
