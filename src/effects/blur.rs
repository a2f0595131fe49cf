//! Separable Gaussian blur over 8-bit coverage masks.
//!
//! Weights are Q16 fixed point so results are bit-identical across runs and platforms.

/// Canvas-style blur radius to a Gaussian sigma (`shadowBlur = 2 * sigma`).
pub fn sigma_for_blur_radius(blur: f32) -> f32 {
    (blur / 2.0).max(0.0)
}

/// Kernel half-width that covers three standard deviations.
pub fn kernel_radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Blur a single-channel `width * height` mask; edges clamp to the nearest pixel.
pub fn blur_alpha8(src: &[u8], width: u32, height: u32, sigma: f32) -> Vec<u8> {
    debug_assert_eq!(src.len(), (width as usize) * (height as usize));
    // taps past the longer side only repeat the clamped edge
    let radius = kernel_radius_for_sigma(sigma).min(width.max(height));
    if radius == 0 || width == 0 || height == 0 {
        return src.to_vec();
    }

    let kernel = gaussian_kernel_q16(radius, sigma);
    let mut tmp = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];
    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    out
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> Vec<u32> {
    let r = i64::from(radius);
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Fold rounding drift into the centre tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }
    weights
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        let row = (y * w) as usize;
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                acc += u64::from(kw) * u64::from(src[row + sx as usize]);
            }
            dst[row + x as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                acc += u64::from(kw) * u64::from(src[(sy * w + x) as usize]);
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

/// Shift a single-channel mask by whole pixels; uncovered pixels become 0.
pub fn translate_alpha8(src: &[u8], width: u32, height: u32, dx: i32, dy: i32) -> Vec<u8> {
    debug_assert_eq!(src.len(), (width as usize) * (height as usize));
    let (w, h) = (width as i32, height as i32);
    let mut out = vec![0u8; src.len()];
    for y in 0..h {
        let sy = y - dy;
        if sy < 0 || sy >= h {
            continue;
        }
        for x in 0..w {
            let sx = x - dx;
            if sx < 0 || sx >= w {
                continue;
            }
            out[(y * w + x) as usize] = src[(sy * w + sx) as usize];
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
