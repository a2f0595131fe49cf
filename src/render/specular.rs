//! Gloss on top of the beveled layer: a soft band for text, glare plus a shine spot for images.

use crate::effects::composite::CompositeOp;
use crate::effects::paint::{LinearGradient, fill_ellipse};
use crate::foundation::core::{Color, Point, Rect};
use crate::foundation::error::{GlazeError, GlazeResult};
use crate::render::surface::{Silhouette, Surface};

/// Gloss band and outline used in text mode.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextSpecularParams {
    /// Band top sits this many font sizes above the anchor.
    pub band_offset_ratio: f32,
    /// Band height as a fraction of the font size.
    pub band_height_ratio: f32,
    /// Lower bound on the band height in pixels.
    pub band_min_height_px: f32,
    /// Band tint.
    pub band_color: Color,
    /// Band tint opacity.
    pub band_alpha: f32,
    /// Number of faint additive passes laid down before the full one.
    pub soft_passes: u32,
    /// Opacity of each faint pass.
    pub soft_pass_opacity: f32,
    /// Outline width as a fraction of the font size.
    pub outline_ratio: f32,
    /// Lower bound on the outline width in pixels.
    pub outline_min_px: f32,
    /// Outline tint.
    pub outline_color: Color,
    /// Outline opacity.
    pub outline_alpha: f32,
}

impl Default for TextSpecularParams {
    fn default() -> Self {
        Self {
            band_offset_ratio: 0.38,
            band_height_ratio: 0.12,
            band_min_height_px: 8.0,
            band_color: Color::WHITE,
            band_alpha: 0.9,
            soft_passes: 6,
            soft_pass_opacity: 0.12,
            outline_ratio: 0.03,
            outline_min_px: 2.0,
            outline_color: Color::BLACK,
            outline_alpha: 0.45,
        }
    }
}

/// Glare gradient and elliptical shine used for images.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlareParams {
    /// Glare tint.
    pub color: Color,
    /// Gradient length as a fraction of the box height, starting at the box top.
    pub extent_ratio: f32,
    /// Filled part of the box, from the top, as a fraction of its height.
    pub fill_ratio: f32,
    /// `[offset, alpha]` stops along the gradient.
    pub stops: [[f32; 2]; 3],
    /// Shine center as fractions of the box size.
    pub shine_center: [f32; 2],
    /// Shine radii as fractions of the box size.
    pub shine_radii: [f32; 2],
    /// Shine opacity.
    pub shine_alpha: f32,
}

impl Default for GlareParams {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            extent_ratio: 0.6,
            fill_ratio: 0.45,
            stops: [[0.0, 0.65], [0.15, 0.18], [0.6, 0.02]],
            shine_center: [0.22, 0.20],
            shine_radii: [0.09, 0.05],
            shine_alpha: 0.45,
        }
    }
}

/// Both specular flavours.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecularParams {
    /// Text mode.
    pub text: TextSpecularParams,
    /// Image mode.
    pub glare: GlareParams,
}

impl SpecularParams {
    /// Reject non-finite or out-of-range values.
    pub fn validate(&self) -> GlazeResult<()> {
        let t = &self.text;
        let g = &self.glare;
        let values = [
            t.band_offset_ratio,
            t.band_height_ratio,
            t.band_min_height_px,
            t.outline_ratio,
            t.outline_min_px,
            g.extent_ratio,
            g.fill_ratio,
            g.shine_center[0],
            g.shine_center[1],
            g.shine_radii[0],
            g.shine_radii[1],
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(GlazeError::validation("specular params must be finite"));
        }
        let alphas = [
            t.band_alpha,
            t.soft_pass_opacity,
            t.outline_alpha,
            g.shine_alpha,
            g.stops[0][1],
            g.stops[1][1],
            g.stops[2][1],
        ];
        if alphas.iter().any(|a| !(0.0..=1.0).contains(a)) {
            return Err(GlazeError::validation("specular opacities must be in [0, 1]"));
        }
        if !g.stops.windows(2).all(|w| w[0][0] <= w[1][0]) {
            return Err(GlazeError::validation("glare stops must be sorted by offset"));
        }
        Ok(())
    }
}

/// Where the gloss goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpecularTarget {
    /// Text anchored (centered) at `anchor`, laid out at `size_px`.
    Text {
        /// Text center.
        anchor: Point,
        /// Font size in pixels.
        size_px: f32,
    },
    /// Placed image box.
    Rect(Rect),
}

/// Add the gloss for `target` onto `surface`, confined to `silhouette`.
#[tracing::instrument(level = "debug", skip(surface, silhouette, params))]
pub fn add_specular(
    surface: &mut Surface,
    silhouette: &Silhouette,
    target: SpecularTarget,
    params: &SpecularParams,
) -> GlazeResult<()> {
    match target {
        SpecularTarget::Text { anchor, size_px } => {
            add_text_band(surface, silhouette, anchor, size_px, &params.text);
            Ok(())
        }
        SpecularTarget::Rect(rect) => add_glare(surface, silhouette, rect, &params.glare),
    }
}

/// Row span `(top, height)` of the text gloss band.
pub fn band_rows(anchor_y: f64, size_px: f32, params: &TextSpecularParams) -> (f64, f64) {
    let size = f64::from(size_px);
    let top = (anchor_y - f64::from(params.band_offset_ratio) * size).round();
    let height = (f64::from(params.band_height_ratio) * size)
        .round()
        .max(f64::from(params.band_min_height_px));
    (top, height)
}

fn add_text_band(
    surface: &mut Surface,
    silhouette: &Silhouette,
    anchor: Point,
    size_px: f32,
    params: &TextSpecularParams,
) {
    let canvas = surface.canvas();
    let (top, height) = band_rows(anchor.y, size_px, params);
    let solid = LinearGradient::vertical(0.0, 1.0, vec![(
        0.0,
        params.band_color.with_alpha(params.band_alpha),
    )]);
    let mut band = solid.paint_in(
        canvas,
        Rect::new(0.0, top, f64::from(canvas.width), top + height),
    );
    band.mask_in(silhouette);

    for _ in 0..params.soft_passes {
        surface.draw(&band, CompositeOp::Lighter, params.soft_pass_opacity);
    }
    surface.draw(&band, CompositeOp::Lighter, 1.0);
}

fn add_glare(
    surface: &mut Surface,
    silhouette: &Silhouette,
    rect: Rect,
    params: &GlareParams,
) -> GlazeResult<()> {
    let canvas = surface.canvas();
    let (w, h) = (rect.width(), rect.height());

    let stops: Vec<_> = params
        .stops
        .iter()
        .map(|[t, a]| (*t, params.color.with_alpha(*a)))
        .collect();
    let gradient = LinearGradient::vertical(
        rect.y0,
        rect.y0 + f64::from(params.extent_ratio) * h,
        stops,
    );
    let mut glare = gradient.paint_in(
        canvas,
        Rect::new(
            rect.x0,
            rect.y0,
            rect.x1,
            rect.y0 + f64::from(params.fill_ratio) * h,
        ),
    );
    glare.mask_in(silhouette);
    surface.draw(&glare, CompositeOp::Lighter, 1.0);

    let center = Point::new(
        rect.x0 + f64::from(params.shine_center[0]) * w,
        rect.y0 + f64::from(params.shine_center[1]) * h,
    );
    let mut shine = fill_ellipse(
        canvas,
        center,
        f64::from(params.shine_radii[0]) * w,
        f64::from(params.shine_radii[1]) * h,
        params.color,
        params.shine_alpha,
    )?;
    shine.mask_in(silhouette);
    surface.draw(&shine, CompositeOp::Lighter, 1.0);
    Ok(())
}

/// Stroke width for the text outline at `size_px`.
pub fn outline_width(size_px: f32, params: &TextSpecularParams) -> f64 {
    f64::from((params.outline_ratio * size_px).max(params.outline_min_px))
}

/// Draw the dark outline band over `surface`.
pub fn add_outline(surface: &mut Surface, outline: &Silhouette, params: &TextSpecularParams) {
    let stroke = outline.tint(params.outline_color.with_alpha(params.outline_alpha));
    surface.draw(&stroke, CompositeOp::SourceOver, 1.0);
}

#[cfg(test)]
#[path = "../../tests/unit/render/specular.rs"]
mod tests;
