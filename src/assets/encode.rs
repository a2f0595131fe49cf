use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{GlazeError, GlazeResult};
use crate::render::surface::Surface;

/// File name used when the caller does not pick one.
pub const DEFAULT_EXPORT_NAME: &str = "asl_applied.png";

/// PNG bytes of `surface` with straight alpha.
pub fn encode_png(surface: &Surface) -> GlazeResult<Vec<u8>> {
    let rgba = image::RgbaImage::from_raw(
        surface.width,
        surface.height,
        surface.to_straight_rgba8(),
    )
    .ok_or_else(|| GlazeError::validation("surface bytes do not match its dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Write `surface` as a PNG file, creating parent directories as needed.
pub fn write_png(surface: &Surface, path: &Path) -> GlazeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &surface.to_straight_rgba8(),
        surface.width,
        surface.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
