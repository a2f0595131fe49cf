use std::sync::Arc;

use super::*;
use crate::assets::decode::DecodedImage;
use crate::foundation::core::Point;
use crate::render::surface::Silhouette;
use crate::render::text::TextExtent;

/// Every character is a 20x28 block with a 4px gap.
struct Blocks;

impl GlyphRasterizer for Blocks {
    fn measure(&mut self, text: &str, _: &str, _: f32) -> GlazeResult<TextExtent> {
        let n = text.chars().count() as f32;
        Ok(TextExtent {
            width: n * 24.0 - 4.0,
            height: 28.0,
        })
    }

    fn rasterize(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        center: Point,
        canvas: Canvas,
    ) -> GlazeResult<Silhouette> {
        let e = self.measure(text, family, size_px)?;
        let left = (center.x as f32 - e.width / 2.0) as u32;
        let top = (center.y as f32 - e.height / 2.0) as u32;
        let mut m = Silhouette::empty(canvas);
        for i in 0..text.chars().count() as u32 {
            for y in top..top + 28 {
                for x in left + i * 24..left + i * 24 + 20 {
                    m.alpha[(y * canvas.width + x) as usize] = 255;
                }
            }
        }
        Ok(m)
    }
}

fn text_config(text: &str) -> RenderConfig {
    RenderConfig {
        text: text.to_owned(),
        font_size_px: 40.0,
        ..RenderConfig::default()
    }
}

#[test]
fn text_preview_covers_glyphs_and_outline_only() {
    let canvas = Canvas::new(160, 80).unwrap();
    let cfg = text_config("AB");
    let params = EffectParams::default();
    let mut out = Surface::new(canvas);
    render_preview_into(&mut out, Color::rgb(0x4f, 0xb3, 0xff), &cfg, &mut Blocks, &params).unwrap();

    let fill = Blocks
        .rasterize("AB", "", 40.0, canvas.center(), canvas)
        .unwrap();
    let stroke = Blocks
        .rasterize_stroke("AB", "", 40.0, canvas.center(), outline_width(40.0, &params.specular.text), canvas)
        .unwrap();
    for (i, px) in out.data.chunks_exact(4).enumerate() {
        let covered = fill.alpha[i] != 0 || stroke.alpha[i] != 0;
        assert_eq!(px[3] != 0, covered, "pixel {i}");
    }
}

#[test]
fn text_preview_is_lit_from_above() {
    let canvas = Canvas::new(160, 80).unwrap();
    let mut out = Surface::new(canvas);
    let params = EffectParams::default();
    render_preview_into(&mut out, Color::rgb(0x4f, 0xb3, 0xff), &text_config("AB"), &mut Blocks, &params)
        .unwrap();
    // blocks span rows 26..54; compare the interior just below the band with the bottom
    let upper = out.pixel(68, 34);
    let lower = out.pixel(68, 50);
    let lum = |p: [u8; 4]| u32::from(p[0]) + u32::from(p[1]) + u32::from(p[2]);
    assert!(lum(upper) > lum(lower), "{upper:?} vs {lower:?}");
}

#[test]
fn rendering_twice_is_pixel_identical() {
    let canvas = Canvas::new(160, 80).unwrap();
    let params = EffectParams::default();
    let cfg = text_config("XYZ");
    let style = Style::default();
    let a = render_style(&style, &cfg, &mut Blocks, &params, canvas).unwrap();
    let b = render_style(&style, &cfg, &mut Blocks, &params, canvas).unwrap();
    assert_eq!(a, b);

    let mut reused = b.clone();
    render_preview_into(&mut reused, resolve_color(&style, ColorSite::Preview), &cfg, &mut Blocks, &params)
        .unwrap();
    assert_eq!(a, reused);
}

#[test]
fn image_preview_is_confined_to_the_image_alpha() {
    let canvas = Canvas::new(200, 100).unwrap();
    let mut img = image::RgbaImage::new(40, 20);
    for y in 5..15 {
        for x in 10..30 {
            img.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
        }
    }
    let cfg = RenderConfig {
        mode: RenderMode::Image,
        source_image: Some(Arc::new(DecodedImage::from_rgba(img))),
        ..RenderConfig::default()
    };
    struct NoGlyphs;
    impl GlyphRasterizer for NoGlyphs {
        fn measure(&mut self, _: &str, _: &str, _: f32) -> GlazeResult<TextExtent> {
            panic!("image mode must not shape text");
        }
        fn rasterize(&mut self, _: &str, _: &str, _: f32, _: Point, _: Canvas) -> GlazeResult<Silhouette> {
            panic!("image mode must not rasterize text");
        }
    }

    let mut out = Surface::new(canvas);
    render_preview_into(&mut out, Color::rgb(200, 60, 60), &cfg, &mut NoGlyphs, &EffectParams::default())
        .unwrap();
    // image placed at (80, 40); opaque area is (90..110, 45..55)
    assert_eq!(out.pixel(100, 50)[3], 255);
    assert_eq!(out.pixel(85, 50)[3], 0);
    assert_eq!(out.pixel(100, 42)[3], 0);
    let covered = out.data.chunks_exact(4).filter(|p| p[3] != 0).count();
    assert_eq!(covered, 200);
}

#[test]
fn image_mode_without_image_renders_text() {
    let canvas = Canvas::new(160, 80).unwrap();
    let params = EffectParams::default();
    let text = text_config("AB");
    let image_cfg = RenderConfig {
        mode: RenderMode::Image,
        ..text.clone()
    };
    let a = render_style(&Style::default(), &text, &mut Blocks, &params, canvas).unwrap();
    let b = render_style(&Style::default(), &image_cfg, &mut Blocks, &params, canvas).unwrap();
    assert_eq!(a, b);
}

#[test]
fn plain_preview_is_white_text_on_dark() {
    let canvas = Canvas::new(160, 80).unwrap();
    let out = render_plain_preview(&mut Blocks, &text_config("AB"), canvas).unwrap();
    assert_eq!(out.pixel(0, 0), [0x07, 0x10, 0x22, 255]);
    assert_eq!(out.pixel(60, 40), [255, 255, 255, 255]);
}

#[test]
fn empty_text_renders_sample() {
    let canvas = Canvas::new(400, 80).unwrap();
    let params = EffectParams::default();
    let empty = render_style(&Style::default(), &text_config(""), &mut Blocks, &params, canvas).unwrap();
    let sample = render_style(
        &Style::default(),
        &text_config(crate::config::DEFAULT_SAMPLE_TEXT),
        &mut Blocks,
        &params,
        canvas,
    )
    .unwrap();
    assert_eq!(empty, sample);
}

#[test]
fn oversized_font_request_renders_within_bounds() {
    let canvas = Canvas::new(160, 80).unwrap();
    let params = EffectParams::default();
    let cfg = RenderConfig {
        text: "AB".to_owned(),
        font_size_px: crate::config::parse_font_size("1e30"),
        ..RenderConfig::default()
    };
    let mut out = Surface::new(canvas);
    render_preview_into(&mut out, Color::rgb(0x4f, 0xb3, 0xff), &cfg, &mut Blocks, &params)
        .unwrap();

    let size = cfg.effective_font_size();
    let fill = Blocks.rasterize("AB", "", size, canvas.center(), canvas).unwrap();
    let stroke = Blocks
        .rasterize_stroke(
            "AB",
            "",
            size,
            canvas.center(),
            outline_width(size, &params.specular.text),
            canvas,
        )
        .unwrap();
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            if fill.coverage(x, y) == 0 && stroke.coverage(x, y) == 0 {
                assert_eq!(out.pixel(x, y)[3], 0, "({x},{y})");
            }
        }
    }
    assert!(out.pixel(70, 40)[3] > 0);
}
