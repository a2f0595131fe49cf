use super::*;

#[test]
fn blur_sigma_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_alpha8(&src, 4, 2, 0.0);
    assert_eq!(out, src);
}

#[test]
fn blur_constant_mask_is_identity() {
    let (w, h) = (6u32, 5u32);
    let src = vec![140u8; (w * h) as usize];
    let out = blur_alpha8(&src, w, h, 2.0);
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(4 * w + 4) as usize] = 255;

    let out = blur_alpha8(&src, w, h, 0.8);

    let nonzero = out.iter().filter(|&&a| a != 0).count();
    assert!(nonzero > 1);
    let sum: u32 = out.iter().map(|&a| u32::from(a)).sum();
    assert!((sum as i32 - 255).abs() <= 12);
}

#[test]
fn kernel_sums_to_one() {
    let k = gaussian_kernel_q16(5, 1.7);
    assert_eq!(k.len(), 11);
    assert_eq!(k.iter().map(|&v| u64::from(v)).sum::<u64>(), 65536);
}

#[test]
fn radius_follows_canvas_convention() {
    assert_eq!(sigma_for_blur_radius(10.8), 5.4);
    assert_eq!(kernel_radius_for_sigma(5.4), 17);
    assert_eq!(kernel_radius_for_sigma(0.0), 0);
    assert_eq!(kernel_radius_for_sigma(f32::NAN), 0);
}

#[test]
fn translate_moves_and_clears() {
    // 3x2 mask, shift right by 1 and up by 1.
    let src = vec![1u8, 2, 3, 4, 5, 6];
    let out = translate_alpha8(&src, 3, 2, 1, -1);
    assert_eq!(out, vec![0, 4, 5, 0, 0, 0]);
    assert_eq!(translate_alpha8(&src, 3, 2, 0, 0), src);
    assert_eq!(translate_alpha8(&src, 3, 2, 5, 0), vec![0; 6]);
}

#[test]
fn huge_sigma_is_capped_to_the_mask() {
    let (w, h) = (6u32, 4u32);
    let src = vec![90u8; (w * h) as usize];
    assert_eq!(blur_alpha8(&src, w, h, 1e30), src);

    let mut dot = vec![0u8; (w * h) as usize];
    dot[0] = 255;
    let out = blur_alpha8(&dot, w, h, f32::MAX);
    assert_eq!(out.len(), dot.len());
    assert!(out.iter().all(|&a| a < 255));
}

#[test]
fn kernel_radius_saturates_without_wrapping() {
    assert_eq!(kernel_radius_for_sigma(1e30), u32::MAX);
    let k = gaussian_kernel_q16(3, 1e30);
    assert_eq!(k.len(), 7);
    assert_eq!(k.iter().map(|&q| u64::from(q)).sum::<u64>(), 65536);
}
