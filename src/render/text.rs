//! Text silhouettes behind a small capability trait.
//!
//! The compositing passes only ever see [`Silhouette`] masks; which engine shapes and fills the
//! glyphs is decided by the [`GlyphRasterizer`] the caller hands in.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use crate::effects::paint::rasterize_with;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{GlazeError, GlazeResult};
use crate::render::surface::Silhouette;

/// Size of a laid-out line of text in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    /// Advance width.
    pub width: f32,
    /// Line box height.
    pub height: f32,
}

/// Capability for turning a string into coverage masks.
///
/// `center` is where the middle of the line box lands; text is horizontally centered on it.
/// Implementations must be deterministic: identical arguments yield identical masks.
pub trait GlyphRasterizer {
    /// Measure `text` at `family`/`size_px`.
    fn measure(&mut self, text: &str, family: &str, size_px: f32) -> GlazeResult<TextExtent>;

    /// Filled glyph coverage.
    fn rasterize(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        center: Point,
        canvas: Canvas,
    ) -> GlazeResult<Silhouette>;

    /// Coverage of a stroke of `width` px traced along the glyph outlines.
    ///
    /// The default derives the band from the filled mask (dilation minus erosion), which is
    /// good enough for engines without native stroking.
    fn rasterize_stroke(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        center: Point,
        width: f64,
        canvas: Canvas,
    ) -> GlazeResult<Silhouette> {
        let fill = self.rasterize(text, family, size_px, center, canvas)?;
        let radius = (width / 2.0).round().max(1.0) as u32;
        Ok(outline_band(&fill, radius))
    }
}

/// Morphological gradient of `mask`: `dilate(mask, r) - erode(mask, r)` with a square window.
pub fn outline_band(mask: &Silhouette, radius: u32) -> Silhouette {
    let (w, h) = (mask.width as usize, mask.height as usize);
    let dilated = window_filter(&mask.alpha, w, h, radius as usize, u8::max, 0);
    let eroded = window_filter(&mask.alpha, w, h, radius as usize, u8::min, 255);
    let alpha = dilated
        .iter()
        .zip(eroded.iter())
        .map(|(&d, &e)| d.saturating_sub(e))
        .collect();
    Silhouette {
        width: mask.width,
        height: mask.height,
        alpha,
    }
}

fn window_filter(
    src: &[u8],
    w: usize,
    h: usize,
    r: usize,
    pick: fn(u8, u8) -> u8,
    outside: u8,
) -> Vec<u8> {
    let mut tmp = vec![0u8; src.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = pick(outside, src[y * w + x]);
            for k in 1..=r {
                let left = if x >= k { src[y * w + x - k] } else { outside };
                let right = if x + k < w { src[y * w + x + k] } else { outside };
                acc = pick(acc, pick(left, right));
            }
            tmp[y * w + x] = acc;
        }
    }
    let mut out = vec![0u8; src.len()];
    for y in 0..h {
        for x in 0..w {
            let mut acc = pick(outside, tmp[y * w + x]);
            for k in 1..=r {
                let up = if y >= k { tmp[(y - k) * w + x] } else { outside };
                let down = if y + k < h { tmp[(y + k) * w + x] } else { outside };
                acc = pick(acc, pick(up, down));
            }
            out[y * w + x] = acc;
        }
    }
    out
}

struct ShapedRun {
    font_size: f32,
    glyphs: Vec<vello_cpu::Glyph>,
}

struct ShapedText {
    font: vello_cpu::peniko::FontData,
    extent: TextExtent,
    runs: Vec<ShapedRun>,
}

/// [`GlyphRasterizer`] backed by Parley shaping and `vello_cpu` glyph rendering.
///
/// Fonts are registered from raw bytes; families are addressed by the name the font reports.
pub struct ParleyRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    fonts: BTreeMap<String, vello_cpu::peniko::FontData>,
    first_family: Option<String>,
}

impl Default for ParleyRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyRasterizer {
    /// Rasterizer with no fonts registered.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: BTreeMap::new(),
            first_family: None,
        }
    }

    /// Register a font from memory and return its family name.
    pub fn register_font_bytes(&mut self, font_bytes: Vec<u8>) -> GlazeResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            GlazeError::validation("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| GlazeError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        self.fonts.insert(family_name.clone(), font);
        if self.first_family.is_none() {
            self.first_family = Some(family_name.clone());
        }
        tracing::debug!(family = %family_name, "registered font");
        Ok(family_name)
    }

    /// Register a font file and return its family name.
    pub fn register_font_file(&mut self, path: &Path) -> GlazeResult<String> {
        let bytes = std::fs::read(path).map_err(|e| {
            GlazeError::validation(format!("failed to read font '{}': {e}", path.display()))
        })?;
        self.register_font_bytes(bytes)
    }

    /// Registered family names, sorted.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    fn resolve_family(&self, family: &str) -> GlazeResult<String> {
        if self.fonts.contains_key(family) {
            return Ok(family.to_owned());
        }
        let fallback = self
            .first_family
            .clone()
            .ok_or_else(|| GlazeError::validation("no fonts registered for text rendering"))?;
        tracing::warn!(requested = family, using = %fallback, "font family not registered");
        Ok(fallback)
    }

    fn shape(&mut self, text: &str, family: &str, size_px: f32) -> GlazeResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(GlazeError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family = self.resolve_family(family)?;
        let font = self
            .fonts
            .get(&family)
            .cloned()
            .ok_or_else(|| GlazeError::evaluation("resolved font family vanished"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut runs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let mut x = run.offset();
                let y = run.baseline();
                let glyphs = run
                    .glyphs()
                    .map(|g| {
                        let glyph = vello_cpu::Glyph {
                            id: g.id,
                            x: x + g.x,
                            y: y - g.y,
                        };
                        x += g.advance;
                        glyph
                    })
                    .collect();
                runs.push(ShapedRun {
                    font_size: run.run().font_size(),
                    glyphs,
                });
            }
        }

        Ok(ShapedText {
            font,
            extent: TextExtent {
                width: layout.width(),
                height: layout.height(),
            },
            runs,
        })
    }

    fn render_shaped(
        shaped: &ShapedText,
        center: Point,
        canvas: Canvas,
        stroke_width: Option<f64>,
    ) -> GlazeResult<Silhouette> {
        let origin_x = center.x - f64::from(shaped.extent.width) / 2.0;
        let origin_y = center.y - f64::from(shaped.extent.height) / 2.0;
        let surface = rasterize_with(canvas, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin_x, origin_y)));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            if let Some(w) = stroke_width {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(w));
            }
            for run in &shaped.runs {
                let builder = ctx.glyph_run(&shaped.font).font_size(run.font_size);
                match stroke_width {
                    Some(_) => builder.stroke_glyphs(run.glyphs.iter().copied()),
                    None => builder.fill_glyphs(run.glyphs.iter().copied()),
                }
            }
        })?;
        Ok(Silhouette::from_surface(&surface))
    }
}

impl GlyphRasterizer for ParleyRasterizer {
    fn measure(&mut self, text: &str, family: &str, size_px: f32) -> GlazeResult<TextExtent> {
        Ok(self.shape(text, family, size_px)?.extent)
    }

    fn rasterize(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        center: Point,
        canvas: Canvas,
    ) -> GlazeResult<Silhouette> {
        let shaped = self.shape(text, family, size_px)?;
        Self::render_shaped(&shaped, center, canvas, None)
    }

    fn rasterize_stroke(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        center: Point,
        width: f64,
        canvas: Canvas,
    ) -> GlazeResult<Silhouette> {
        let shaped = self.shape(text, family, size_px)?;
        Self::render_shaped(&shaped, center, canvas, Some(width))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
