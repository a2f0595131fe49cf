//! Premultiplied RGBA8 compositing kernels.
//!
//! All kernels take tightly packed buffers of equal length; callers guarantee matching
//! dimensions, so the kernels themselves cannot fail.

use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// How a source layer is combined with the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeOp {
    /// Porter-Duff source-over.
    SourceOver,
    /// Saturating premultiplied add (canvas `lighter`).
    Lighter,
    /// Source-over with the multiply blend function.
    Multiply,
    /// Source-over with the overlay blend function.
    Overlay,
}

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn lighter(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let op = ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    if op == 0 || src[3] == 0 {
        return dst;
    }
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(dst[i], mul_div255_u8(u16::from(src[i]), op));
    }
    out
}

/// Composite `src` onto `dst` in place.
pub fn composite_in_place(dst: &mut [u8], src: &[u8], op: CompositeOp, opacity: f32) {
    debug_assert_eq!(dst.len(), src.len());
    debug_assert!(dst.len().is_multiple_of(4));

    // Dispatch once per layer, not per pixel.
    match op {
        CompositeOp::SourceOver => {
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
                d.copy_from_slice(&out);
            }
        }
        CompositeOp::Lighter => {
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                let out = lighter([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
                d.copy_from_slice(&out);
            }
        }
        CompositeOp::Multiply => blend_over_in_place(dst, src, opacity, |s, d| s * d),
        CompositeOp::Overlay => blend_over_in_place(dst, src, opacity, |s, d| {
            if d <= 0.5 {
                2.0 * s * d
            } else {
                1.0 - 2.0 * (1.0 - s) * (1.0 - d)
            }
        }),
    }
}

/// Destination-in against a coverage mask: every channel is scaled by the mask value.
///
/// `mask` holds one byte per pixel.
pub fn destination_in_in_place(dst: &mut [u8], mask: &[u8]) {
    debug_assert_eq!(dst.len(), mask.len() * 4);
    for (d, &m) in dst.chunks_exact_mut(4).zip(mask.iter()) {
        let w = u16::from(m);
        d[0] = mul_div255_u8(u16::from(d[0]), w);
        d[1] = mul_div255_u8(u16::from(d[1]), w);
        d[2] = mul_div255_u8(u16::from(d[2]), w);
        d[3] = mul_div255_u8(u16::from(d[3]), w);
    }
}

#[inline(always)]
fn blend_over_in_place<F>(dst: &mut [u8], src: &[u8], opacity: f32, blend_fn: F)
where
    F: Fn(f32, f32) -> f32,
{
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        // out_a = sa + da * (1 - sa)
        // out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da
        let sa = (f32::from(s[3]) / 255.0) * opacity;
        if sa <= 0.0 {
            continue;
        }
        let da = f32::from(d[3]) / 255.0;
        let inv_sa = 1.0 - sa;

        for c in 0..3 {
            let sp = (f32::from(s[c]) / 255.0) * opacity;
            let dp = f32::from(d[c]) / 255.0;
            let sc = (sp / sa).clamp(0.0, 1.0);
            let dc = if da > 0.0 {
                (dp / da).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let b = blend_fn(sc, dc).clamp(0.0, 1.0);
            let out_p = (sp * (1.0 - da) + dp * inv_sa + b * sa * da).clamp(0.0, 1.0);
            d[c] = (out_p * 255.0).round() as u8;
        }
        let out_a = (sa + da * inv_sa).clamp(0.0, 1.0);
        d[3] = (out_a * 255.0).round() as u8;
    }
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
