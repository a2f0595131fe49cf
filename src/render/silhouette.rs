//! Coverage masks for the two render modes.

use crate::assets::decode::DecodedImage;
use crate::foundation::core::{Canvas, PixelRect, Point, Rect};
use crate::foundation::error::GlazeResult;
use crate::render::surface::Silhouette;
use crate::render::text::GlyphRasterizer;

/// Image mask plus where the scaled image landed on the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSilhouette {
    /// Alpha of the placed image, canvas-sized.
    pub silhouette: Silhouette,
    /// Placed image rectangle in canvas pixels.
    pub placement: PixelRect,
}

/// Filled glyph coverage of `text`, centered on `center`.
#[tracing::instrument(level = "debug", skip(glyphs, text), fields(chars = text.chars().count()))]
pub fn build_text_silhouette(
    glyphs: &mut dyn GlyphRasterizer,
    text: &str,
    family: &str,
    size_px: f32,
    center: Point,
    canvas: Canvas,
) -> GlazeResult<Silhouette> {
    glyphs.rasterize(text, family, size_px, center, canvas)
}

/// Size of a `w`×`h` image scaled to fit `max_w`×`max_h` without upscaling.
///
/// Dimensions are rounded and never drop below one pixel.
pub fn fit_size(w: u32, h: u32, max_w: f64, max_h: f64) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (0, 0);
    }
    let scale = (max_w / f64::from(w)).min(max_h / f64::from(h)).min(1.0);
    let scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    let dw = (f64::from(w) * scale).round().max(1.0) as u32;
    let dh = (f64::from(h) * scale).round().max(1.0) as u32;
    (dw, dh)
}

/// The image's alpha channel, scaled to fit `target` and centered in it.
pub fn build_image_silhouette(
    image: &DecodedImage,
    target: Rect,
    canvas: Canvas,
) -> ImageSilhouette {
    let (dw, dh) = fit_size(image.width, image.height, target.width(), target.height());
    let placement = PixelRect {
        x: (target.x0 + (target.width() - f64::from(dw)) / 2.0).floor() as i32,
        y: (target.y0 + (target.height() - f64::from(dh)) / 2.0).floor() as i32,
        width: dw,
        height: dh,
    };

    let alpha = if (dw, dh) == (image.width, image.height) {
        image.alpha()
    } else {
        let scaled = image::imageops::resize(
            image.rgba8.as_ref(),
            dw,
            dh,
            image::imageops::FilterType::Triangle,
        );
        scaled.pixels().map(|p| p.0[3]).collect()
    };

    let mut silhouette = Silhouette::empty(canvas);
    let (cw, ch) = (i64::from(canvas.width), i64::from(canvas.height));
    for sy in 0..i64::from(dh) {
        let y = i64::from(placement.y) + sy;
        if !(0..ch).contains(&y) {
            continue;
        }
        for sx in 0..i64::from(dw) {
            let x = i64::from(placement.x) + sx;
            if !(0..cw).contains(&x) {
                continue;
            }
            silhouette.alpha[(y * cw + x) as usize] = alpha[(sy * i64::from(dw) + sx) as usize];
        }
    }

    ImageSilhouette {
        silhouette,
        placement,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/silhouette.rs"]
mod tests;
