//! Three-stop color ramps derived from a single base color.
//!
//! The ramp lightens toward white at the top and darkens toward black at the bottom, which
//! reads as a convex surface lit from above.

use crate::foundation::core::{Color, Rgba8Premul};
use crate::foundation::math::lerp_f32;

/// Lighten every channel by `255 * amount`, clamped to `0..=255`.
pub fn brighten(c: Color, amount: f32) -> Color {
    let ch = |v: u8| -> u8 { (f32::from(v) + 255.0 * amount).round().clamp(0.0, 255.0) as u8 };
    Color::rgb(ch(c.r), ch(c.g), ch(c.b))
}

/// Scale every channel by `1 - amount`, clamped to `0..=255`.
pub fn darken(c: Color, amount: f32) -> Color {
    let ch = |v: u8| -> u8 { (f32::from(v) * (1.0 - amount)).round().clamp(0.0, 255.0) as u8 };
    Color::rgb(ch(c.r), ch(c.g), ch(c.b))
}

/// Ramp shape for one call site.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RampAmounts {
    /// `brighten` amount for the top stop.
    pub lighten: f32,
    /// Offset of the base-color stop in `0..=1`.
    pub mid_stop: f32,
    /// `darken` amount for the bottom stop.
    pub darken: f32,
}

impl RampAmounts {
    /// Text preview ramp.
    pub const TEXT: Self = Self {
        lighten: 0.18,
        mid_stop: 0.45,
        darken: 0.24,
    };

    /// Image preview ramp.
    pub const IMAGE: Self = Self {
        lighten: 0.18,
        mid_stop: 0.5,
        darken: 0.22,
    };

    /// Catalog thumbnail ramp.
    pub const THUMBNAIL: Self = Self {
        lighten: 0.12,
        mid_stop: 0.5,
        darken: 0.18,
    };
}

impl Default for RampAmounts {
    fn default() -> Self {
        Self::TEXT
    }
}

/// Vertical 3-stop gradient: `top` at 0, `mid` at `mid_stop`, `bottom` at 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRamp {
    /// Lightened stop.
    pub top: Color,
    /// Base color.
    pub mid: Color,
    /// Darkened stop.
    pub bottom: Color,
    /// Offset of `mid` in `0..=1`.
    pub mid_stop: f32,
}

/// Derive the ramp for `base`.
pub fn ramp(base: Color, amounts: RampAmounts) -> ColorRamp {
    ColorRamp {
        top: brighten(base, amounts.lighten),
        mid: base,
        bottom: darken(base, amounts.darken),
        mid_stop: amounts.mid_stop.clamp(0.0, 1.0),
    }
}

impl ColorRamp {
    /// Color at `t` (clamped to `0..=1`), interpolated linearly between neighbouring stops.
    pub fn sample(&self, t: f32) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let (a, b, local) = if t <= self.mid_stop {
            let span = self.mid_stop;
            let local = if span <= 0.0 { 1.0 } else { t / span };
            (self.top, self.mid, local)
        } else {
            let span = 1.0 - self.mid_stop;
            let local = if span <= 0.0 {
                1.0
            } else {
                (t - self.mid_stop) / span
            };
            (self.mid, self.bottom, local)
        };
        let mix = |x: u8, y: u8| -> u8 {
            lerp_f32(f32::from(x), f32::from(y), local)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Color::rgb(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }

    /// Opaque premultiplied stops, for gradient painting.
    pub fn stops(&self) -> [(f32, Rgba8Premul); 3] {
        [
            (0.0, self.top.with_alpha(1.0)),
            (self.mid_stop, self.mid.with_alpha(1.0)),
            (1.0, self.bottom.with_alpha(1.0)),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/ramp.rs"]
mod tests;
