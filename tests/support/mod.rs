#![allow(dead_code)]

use glaze::{Canvas, GlazeResult, GlyphRasterizer, Point, Silhouette, TextExtent};

/// Deterministic stand-in for a font engine: every character is a solid block.
pub struct BlockGlyphs;

impl BlockGlyphs {
    pub fn block_width(size_px: f32) -> f32 {
        (size_px * 0.5).round()
    }

    pub fn gap(size_px: f32) -> f32 {
        (size_px * 0.1).round()
    }

    pub fn block_height(size_px: f32) -> f32 {
        (size_px * 0.7).round()
    }
}

impl GlyphRasterizer for BlockGlyphs {
    fn measure(&mut self, text: &str, _family: &str, size_px: f32) -> GlazeResult<TextExtent> {
        let n = text.chars().count() as f32;
        let width = n * Self::block_width(size_px) + (n - 1.0).max(0.0) * Self::gap(size_px);
        Ok(TextExtent {
            width,
            height: Self::block_height(size_px),
        })
    }

    fn rasterize(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        center: Point,
        canvas: Canvas,
    ) -> GlazeResult<Silhouette> {
        let extent = self.measure(text, family, size_px)?;
        let left = (center.x as f32 - extent.width / 2.0).round() as i64;
        let top = (center.y as f32 - extent.height / 2.0).round() as i64;
        let (bw, gap, bh) = (
            Self::block_width(size_px) as i64,
            Self::gap(size_px) as i64,
            extent.height as i64,
        );

        let mut mask = Silhouette::empty(canvas);
        let (w, h) = (i64::from(canvas.width), i64::from(canvas.height));
        for i in 0..text.chars().count() as i64 {
            let x0 = left + i * (bw + gap);
            for y in top.max(0)..(top + bh).min(h) {
                for x in x0.max(0)..(x0 + bw).min(w) {
                    mask.alpha[(y * w + x) as usize] = 255;
                }
            }
        }
        Ok(mask)
    }
}
