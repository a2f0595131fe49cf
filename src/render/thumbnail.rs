//! Glossy tile previews for the style grid.

use crate::effects::composite::CompositeOp;
use crate::effects::paint::{LinearGradient, fill_ellipse, stroke_rect};
use crate::effects::ramp::{RampAmounts, ramp};
use crate::foundation::core::{Canvas, Color, Point, Rect};
use crate::foundation::error::{GlazeError, GlazeResult};
use crate::render::surface::Surface;

/// Tile look.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailParams {
    /// Body gradient.
    pub ramp: RampAmounts,
    /// Sheen opacity at the left edge and from mid-width on.
    pub sheen_alpha: [f32; 2],
    /// Sheen height as a fraction of the tile.
    pub sheen_fill: f32,
    /// Shine center as fractions of the tile size.
    pub shine_center: [f32; 2],
    /// Shine radius as a fraction of the shorter tile side.
    pub shine_radius_ratio: f32,
    /// Vertical radius relative to the horizontal one.
    pub shine_aspect: f32,
    /// Shine opacity.
    pub shine_alpha: f32,
    /// Multiply shade opacity at the top and bottom.
    pub shade_alpha: [f32; 2],
    /// Border width in pixels.
    pub border_width: f32,
    /// Border opacity.
    pub border_alpha: f32,
}

impl Default for ThumbnailParams {
    fn default() -> Self {
        Self {
            ramp: RampAmounts::THUMBNAIL,
            sheen_alpha: [0.35, 0.02],
            sheen_fill: 0.45,
            shine_center: [0.25, 0.2],
            shine_radius_ratio: 0.14,
            shine_aspect: 0.6,
            shine_alpha: 0.45,
            shade_alpha: [0.12, 0.35],
            border_width: 1.0,
            border_alpha: 0.25,
        }
    }
}

impl ThumbnailParams {
    /// Reject non-finite or out-of-range values.
    pub fn validate(&self) -> GlazeResult<()> {
        let alphas = [
            self.sheen_alpha[0],
            self.sheen_alpha[1],
            self.shine_alpha,
            self.shade_alpha[0],
            self.shade_alpha[1],
            self.border_alpha,
        ];
        if alphas.iter().any(|a| !(0.0..=1.0).contains(a)) {
            return Err(GlazeError::validation("thumbnail opacities must be in [0, 1]"));
        }
        let sizes = [
            self.sheen_fill,
            self.shine_center[0],
            self.shine_center[1],
            self.shine_radius_ratio,
            self.shine_aspect,
            self.border_width,
        ];
        if sizes.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(GlazeError::validation("thumbnail sizes must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Render one tile for `color`.
#[tracing::instrument(level = "debug", skip(params), fields(color = %color))]
pub fn render_thumbnail(
    color: Color,
    canvas: Canvas,
    params: &ThumbnailParams,
) -> GlazeResult<Surface> {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let body = ramp(color, params.ramp);
    let mut tile = LinearGradient::vertical(0.0, h, body.stops()).paint(canvas);

    let sheen = LinearGradient::horizontal(
        0.0,
        w,
        vec![
            (0.0, Color::WHITE.with_alpha(params.sheen_alpha[0])),
            (0.5, Color::WHITE.with_alpha(params.sheen_alpha[1])),
        ],
    )
    .paint_in(canvas, Rect::new(0.0, 0.0, w, h * f64::from(params.sheen_fill)));
    tile.draw(&sheen, CompositeOp::Overlay, 1.0);

    let rx = w.min(h) * f64::from(params.shine_radius_ratio);
    let shine = fill_ellipse(
        canvas,
        Point::new(
            w * f64::from(params.shine_center[0]),
            h * f64::from(params.shine_center[1]),
        ),
        rx,
        rx * f64::from(params.shine_aspect),
        Color::WHITE,
        params.shine_alpha,
    )?;
    tile.draw(&shine, CompositeOp::SourceOver, 1.0);

    let shade = LinearGradient::vertical(
        0.0,
        h,
        vec![
            (0.0, Color::BLACK.with_alpha(params.shade_alpha[0])),
            (1.0, Color::BLACK.with_alpha(params.shade_alpha[1])),
        ],
    )
    .paint(canvas);
    tile.draw(&shade, CompositeOp::Multiply, 1.0);

    if params.border_width > 0.0 {
        let inset = f64::from(params.border_width) / 2.0;
        let border = stroke_rect(
            canvas,
            Rect::new(inset, inset, w - inset, h - inset),
            f64::from(params.border_width),
            Color::BLACK,
            params.border_alpha,
        )?;
        tile.draw(&border, CompositeOp::SourceOver, 1.0);
    }

    Ok(tile)
}

#[cfg(test)]
#[path = "../../tests/unit/render/thumbnail.rs"]
mod tests;
