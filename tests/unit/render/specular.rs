use super::*;
use crate::foundation::core::Canvas;

fn full_block(canvas: Canvas, x0: u32, y0: u32, x1: u32, y1: u32) -> Silhouette {
    let mut m = Silhouette::empty(canvas);
    for y in y0..y1 {
        for x in x0..x1 {
            m.alpha[(y * canvas.width + x) as usize] = 255;
        }
    }
    m
}

fn gray_layer(sil: &Silhouette) -> Surface {
    sil.tint(Color::rgb(40, 40, 40).with_alpha(1.0))
}

#[test]
fn band_rows_follow_font_size() {
    let p = TextSpecularParams::default();
    assert_eq!(band_rows(200.0, 140.0, &p), (147.0, 17.0));
    assert_eq!(band_rows(50.0, 40.0, &p), (35.0, 8.0));
}

#[test]
fn text_band_brightens_only_its_rows_inside_the_mask() {
    let canvas = Canvas::new(120, 120).unwrap();
    let sil = full_block(canvas, 10, 10, 110, 110);
    let mut surface = gray_layer(&sil);
    let before = surface.clone();

    let target = SpecularTarget::Text {
        anchor: Point::new(60.0, 60.0),
        size_px: 100.0,
    };
    add_specular(&mut surface, &sil, target, &SpecularParams::default()).unwrap();

    // band covers rows 22..34
    assert_eq!(surface.pixel(60, 25), [255, 255, 255, 255]);
    assert_eq!(surface.pixel(60, 21), before.pixel(60, 21));
    assert_eq!(surface.pixel(60, 34), before.pixel(60, 34));
    assert_eq!(surface.pixel(5, 25), [0, 0, 0, 0]);
}

#[test]
fn faint_passes_accumulate() {
    let canvas = Canvas::new(40, 40).unwrap();
    let sil = full_block(canvas, 0, 0, 40, 40);
    let mut params = SpecularParams::default();
    params.text.band_alpha = 0.1;
    params.text.soft_passes = 0;
    let mut single = Surface::new(canvas);
    let target = SpecularTarget::Text {
        anchor: Point::new(20.0, 20.0),
        size_px: 20.0,
    };
    add_specular(&mut single, &sil, target, &params).unwrap();

    params.text.soft_passes = 6;
    let mut layered = Surface::new(canvas);
    add_specular(&mut layered, &sil, target, &params).unwrap();

    assert!(layered.pixel(20, 15)[3] > single.pixel(20, 15)[3]);
}

#[test]
fn glare_lights_top_of_box_and_leaves_bottom() {
    let canvas = Canvas::new(100, 100).unwrap();
    let sil = full_block(canvas, 0, 0, 100, 100);
    let mut surface = gray_layer(&sil);
    let before = surface.clone();
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    add_specular(&mut surface, &sil, SpecularTarget::Rect(rect), &SpecularParams::default())
        .unwrap();

    assert!(surface.pixel(50, 1)[0] > before.pixel(50, 1)[0] + 100);
    assert!(surface.pixel(50, 1)[0] > surface.pixel(50, 30)[0]);
    assert_eq!(surface.pixel(50, 80), before.pixel(50, 80));
    // shine spot brightens beyond the plain glare at the same row
    assert!(surface.pixel(22, 20)[0] > surface.pixel(80, 20)[0]);
}

#[test]
fn glare_is_masked_to_silhouette() {
    let canvas = Canvas::new(100, 100).unwrap();
    let sil = full_block(canvas, 40, 0, 60, 100);
    let mut surface = Surface::new(canvas);
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    add_specular(&mut surface, &sil, SpecularTarget::Rect(rect), &SpecularParams::default())
        .unwrap();
    assert_eq!(surface.pixel(10, 5), [0, 0, 0, 0]);
    assert_eq!(surface.pixel(22, 20), [0, 0, 0, 0]);
    assert!(surface.pixel(50, 5)[3] > 0);
}

#[test]
fn outline_width_has_floor() {
    let p = TextSpecularParams::default();
    assert_eq!(outline_width(140.0, &p), f64::from(0.03f32 * 140.0));
    assert_eq!(outline_width(20.0, &p), 2.0);
}

#[test]
fn outline_darkens_under_its_band() {
    let canvas = Canvas::new(10, 10).unwrap();
    let sil = full_block(canvas, 0, 0, 10, 10);
    let mut surface = sil.tint(Color::WHITE.with_alpha(1.0));
    let outline = full_block(canvas, 0, 0, 10, 1);
    add_outline(&mut surface, &outline, &TextSpecularParams::default());
    assert!(surface.pixel(5, 0)[0] < 255);
    assert_eq!(surface.pixel(5, 5), [255, 255, 255, 255]);
}

#[test]
fn default_params_validate() {
    assert!(SpecularParams::default().validate().is_ok());
    let mut p = SpecularParams::default();
    p.glare.stops = [[0.5, 0.1], [0.1, 0.1], [0.9, 0.1]];
    assert!(p.validate().is_err());
}
