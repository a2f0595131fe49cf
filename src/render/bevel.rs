//! Emboss approximation: a soft light edge up-left and a soft dark edge down-right, both kept
//! inside the silhouette.

use crate::effects::blur::{blur_alpha8, sigma_for_blur_radius, translate_alpha8};
use crate::effects::composite::CompositeOp;
use crate::foundation::core::Color;
use crate::foundation::error::{GlazeError, GlazeResult};
use crate::render::surface::{Silhouette, Surface};

/// One tinted, blurred, offset copy of the silhouette.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BevelLayerParams {
    /// Tint.
    pub color: Color,
    /// Tint opacity in `0..=1`.
    pub alpha: f32,
    /// Offset in units of the bevel size.
    pub offset: [f32; 2],
}

/// Bevel tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BevelParams {
    /// Bevel size as a fraction of the reference height (font size or placed image height).
    pub size_ratio: f32,
    /// Lower bound on the bevel size in pixels.
    pub min_size_px: f32,
    /// Canvas-style blur radius in units of the bevel size.
    pub blur_ratio: f32,
    /// Light edge, drawn first.
    pub highlight: BevelLayerParams,
    /// Dark edge, drawn second.
    pub shadow: BevelLayerParams,
}

impl Default for BevelParams {
    fn default() -> Self {
        Self {
            size_ratio: 0.04,
            min_size_px: 4.0,
            blur_ratio: 1.8,
            highlight: BevelLayerParams {
                color: Color::WHITE,
                alpha: 0.55,
                offset: [-0.4, -0.8],
            },
            shadow: BevelLayerParams {
                color: Color::BLACK,
                alpha: 0.6,
                offset: [0.6, 0.9],
            },
        }
    }
}

impl BevelParams {
    /// Reject values that would produce nonsense geometry.
    pub fn validate(&self) -> GlazeResult<()> {
        let finite = [self.size_ratio, self.min_size_px, self.blur_ratio]
            .into_iter()
            .chain([self.highlight, self.shadow].into_iter().flat_map(|l| {
                [l.alpha, l.offset[0], l.offset[1]]
            }))
            .all(f32::is_finite);
        if !finite {
            return Err(GlazeError::validation("bevel params must be finite"));
        }
        if self.size_ratio < 0.0 || self.min_size_px < 0.0 || self.blur_ratio < 0.0 {
            return Err(GlazeError::validation("bevel sizes must be >= 0"));
        }
        for layer in [self.highlight, self.shadow] {
            if !(0.0..=1.0).contains(&layer.alpha) {
                return Err(GlazeError::validation("bevel layer alpha must be in [0, 1]"));
            }
        }
        Ok(())
    }
}

/// `max(min_size_px, round(size_ratio * reference_px))`.
pub fn bevel_size(reference_px: f32, params: &BevelParams) -> f32 {
    (params.size_ratio * reference_px).round().max(params.min_size_px)
}

/// The two bevel layers, canvas-sized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bevel {
    /// Light edge layer.
    pub highlight: Surface,
    /// Dark edge layer.
    pub shadow: Surface,
}

impl Bevel {
    /// Draw the highlight then the shadow over `target`.
    pub fn draw_onto(&self, target: &mut Surface) {
        target.draw(&self.highlight, CompositeOp::SourceOver, 1.0);
        target.draw(&self.shadow, CompositeOp::SourceOver, 1.0);
    }
}

/// Build both bevel layers for `silhouette`.
#[tracing::instrument(level = "debug", skip(silhouette, params))]
pub fn synthesize_bevel(silhouette: &Silhouette, bevel_size: f32, params: &BevelParams) -> Bevel {
    let sigma = sigma_for_blur_radius(params.blur_ratio * bevel_size);
    let blurred = blur_alpha8(&silhouette.alpha, silhouette.width, silhouette.height, sigma);
    Bevel {
        highlight: offset_layer(silhouette, &blurred, bevel_size, &params.highlight),
        shadow: offset_layer(silhouette, &blurred, bevel_size, &params.shadow),
    }
}

fn offset_layer(
    silhouette: &Silhouette,
    blurred: &[u8],
    bevel_size: f32,
    layer: &BevelLayerParams,
) -> Surface {
    let dx = (layer.offset[0] * bevel_size).round() as i32;
    let dy = (layer.offset[1] * bevel_size).round() as i32;
    let shifted = Silhouette {
        width: silhouette.width,
        height: silhouette.height,
        alpha: translate_alpha8(blurred, silhouette.width, silhouette.height, dx, dy),
    };
    let mut out = shifted.tint(layer.color.with_alpha(layer.alpha));
    out.mask_in(silhouette);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/bevel.rs"]
mod tests;
