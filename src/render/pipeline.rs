use crate::config::{EffectParams, RenderConfig, RenderMode};
use crate::effects::composite::CompositeOp;
use crate::effects::ramp::ramp;
use crate::foundation::core::{Canvas, Color, Rect};
use crate::foundation::error::GlazeResult;
use crate::render::bevel::{bevel_size, synthesize_bevel};
use crate::render::compositor::{GradientSpan, compose_base};
use crate::render::silhouette::{build_image_silhouette, build_text_silhouette};
use crate::render::specular::{SpecularTarget, add_outline, add_specular, outline_width};
use crate::render::surface::Surface;
use crate::render::text::GlyphRasterizer;
use crate::style::catalog::{ColorSite, Style, resolve_color};

/// Background of the un-styled preview.
pub const PLAIN_BACKGROUND: Color = Color::rgb(0x07, 0x10, 0x22);

/// Render the glossy preview for `style` onto a fresh surface.
///
/// The style color is resolved with the preview fallback; see [`render_preview_into`] for the
/// passes.
pub fn render_style(
    style: &Style,
    config: &RenderConfig,
    glyphs: &mut dyn GlyphRasterizer,
    params: &EffectParams,
    canvas: Canvas,
) -> GlazeResult<Surface> {
    let mut out = Surface::new(canvas);
    render_preview_into(
        &mut out,
        resolve_color(style, ColorSite::Preview),
        config,
        glyphs,
        params,
    )?;
    Ok(out)
}

/// Clear `out` and redraw the glossy preview of `color`.
///
/// Passes, in order:
/// 1. silhouette (text glyphs, or the fitted image alpha)
/// 2. ramp-filled base layer masked to the silhouette
/// 3. bevel highlight, then bevel shadow
/// 4. specular gloss (text band, or glare plus shine)
/// 5. text only: dark outline along the glyphs
///
/// Image mode without an image renders text. The glyph rasterizer is not consulted in image
/// mode.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(color = %color, mode = ?config.effective_mode(), w = out.width, h = out.height)
)]
pub fn render_preview_into(
    out: &mut Surface,
    color: Color,
    config: &RenderConfig,
    glyphs: &mut dyn GlyphRasterizer,
    params: &EffectParams,
) -> GlazeResult<()> {
    out.clear();
    match (config.effective_mode(), &config.source_image) {
        (RenderMode::Image, Some(image)) => {
            let canvas = out.canvas();
            let ratio = f64::from(params.image_box_ratio);
            let (bw, bh) = (f64::from(canvas.width) * ratio, f64::from(canvas.height) * ratio);
            let c = canvas.center();
            let target = Rect::new(c.x - bw / 2.0, c.y - bh / 2.0, c.x + bw / 2.0, c.y + bh / 2.0);
            let placed = build_image_silhouette(image, target, canvas);
            let rect = placed.placement.to_rect();

            let base = compose_base(
                &ramp(color, params.image_ramp),
                GradientSpan::new(rect.y0, rect.y1),
                &placed.silhouette,
            );
            out.draw(&base, CompositeOp::SourceOver, 1.0);

            let size = bevel_size(placed.placement.height as f32, &params.bevel);
            synthesize_bevel(&placed.silhouette, size, &params.bevel).draw_onto(out);

            add_specular(
                out,
                &placed.silhouette,
                SpecularTarget::Rect(rect),
                &params.specular,
            )
        }
        _ => {
            let canvas = out.canvas();
            let text = config.effective_text();
            let size_px = config.effective_font_size();
            let center = canvas.center();
            let silhouette =
                build_text_silhouette(glyphs, text, &config.font_family, size_px, center, canvas)?;

            let half = f64::from(params.text_span_ratio * size_px);
            let base = compose_base(
                &ramp(color, params.text_ramp),
                GradientSpan::new(center.y - half, center.y + half),
                &silhouette,
            );
            out.draw(&base, CompositeOp::SourceOver, 1.0);

            let size = bevel_size(size_px, &params.bevel);
            synthesize_bevel(&silhouette, size, &params.bevel).draw_onto(out);

            add_specular(
                out,
                &silhouette,
                SpecularTarget::Text {
                    anchor: center,
                    size_px,
                },
                &params.specular,
            )?;

            let outline = glyphs.rasterize_stroke(
                text,
                &config.font_family,
                size_px,
                center,
                outline_width(size_px, &params.specular.text),
                canvas,
            )?;
            add_outline(out, &outline, &params.specular.text);
            Ok(())
        }
    }
}

/// Clear `out` and draw the un-styled preview: dark background, white centered text.
#[tracing::instrument(level = "debug", skip_all, fields(w = out.width, h = out.height))]
pub fn render_plain_preview_into(
    out: &mut Surface,
    config: &RenderConfig,
    glyphs: &mut dyn GlyphRasterizer,
) -> GlazeResult<()> {
    let canvas = out.canvas();
    out.fill(PLAIN_BACKGROUND.with_alpha(1.0));
    let text = build_text_silhouette(
        glyphs,
        config.effective_text(),
        &config.font_family,
        config.effective_font_size(),
        canvas.center(),
        canvas,
    )?;
    out.draw(&text.tint(Color::WHITE.with_alpha(1.0)), CompositeOp::SourceOver, 1.0);
    Ok(())
}

/// [`render_plain_preview_into`] onto a fresh surface.
pub fn render_plain_preview(
    glyphs: &mut dyn GlyphRasterizer,
    config: &RenderConfig,
    canvas: Canvas,
) -> GlazeResult<Surface> {
    let mut out = Surface::new(canvas);
    render_plain_preview_into(&mut out, config, glyphs)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
