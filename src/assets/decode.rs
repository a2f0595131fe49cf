use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{GlazeError, GlazeResult};

/// A decoded raster image with straight (non-premultiplied) RGBA8 pixels.
///
/// Cheap to clone; render configs share one decoded image across passes.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight RGBA8, row-major.
    pub rgba8: Arc<image::RgbaImage>,
}

impl DecodedImage {
    /// Wrap an already-decoded buffer.
    pub fn from_rgba(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            rgba8: Arc::new(rgba),
        }
    }

    /// The alpha channel, one byte per pixel.
    pub fn alpha(&self) -> Vec<u8> {
        self.rgba8.pixels().map(|p| p.0[3]).collect()
    }
}

/// Decode any format the `image` crate understands.
pub fn decode_image(bytes: &[u8]) -> GlazeResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| GlazeError::image_load(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(GlazeError::image_load("image has zero area"));
    }
    tracing::debug!(width = rgba.width(), height = rgba.height(), "decoded image");
    Ok(DecodedImage::from_rgba(rgba))
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> GlazeResult<DecodedImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| GlazeError::image_load(format!("read '{}': {e}", path.display())))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
