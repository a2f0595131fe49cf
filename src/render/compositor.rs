use crate::effects::paint::LinearGradient;
use crate::effects::ramp::ColorRamp;
use crate::render::surface::{Silhouette, Surface};

/// Vertical extent a ramp is stretched over, in canvas pixels. Rows outside clamp to the ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientSpan {
    /// Row where the top stop sits.
    pub y0: f64,
    /// Row where the bottom stop sits.
    pub y1: f64,
}

impl GradientSpan {
    /// Span from `y0` to `y1`.
    pub fn new(y0: f64, y1: f64) -> Self {
        Self { y0, y1 }
    }
}

/// Base colored layer: the ramp painted over the canvas, kept only where the silhouette covers.
///
/// The result's alpha equals the silhouette coverage pixel for pixel.
pub fn compose_base(ramp: &ColorRamp, span: GradientSpan, silhouette: &Silhouette) -> Surface {
    let mut layer =
        LinearGradient::vertical(span.y0, span.y1, ramp.stops()).paint(silhouette.canvas());
    layer.mask_in(silhouette);
    layer
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
