//! Fill primitives: linear gradients (computed directly) and vector shapes (rasterized with
//! `vello_cpu`).

use crate::foundation::core::{Canvas, Color, Point, Rect, Rgba8Premul};
use crate::foundation::error::{GlazeError, GlazeResult};
use crate::render::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientAxis {
    Vertical,
    Horizontal,
}

/// Axis-aligned linear gradient with premultiplied stops, clamped outside `start..end`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub axis: GradientAxis,
    pub start: f64,
    pub end: f64,
    pub stops: Vec<(f32, Rgba8Premul)>,
}

impl LinearGradient {
    pub fn vertical(y0: f64, y1: f64, stops: impl Into<Vec<(f32, Rgba8Premul)>>) -> Self {
        Self {
            axis: GradientAxis::Vertical,
            start: y0,
            end: y1,
            stops: stops.into(),
        }
    }

    pub fn horizontal(x0: f64, x1: f64, stops: impl Into<Vec<(f32, Rgba8Premul)>>) -> Self {
        Self {
            axis: GradientAxis::Horizontal,
            start: x0,
            end: x1,
            stops: stops.into(),
        }
    }

    /// Premultiplied color at gradient parameter `t`.
    pub fn color_at(&self, t: f32) -> [u8; 4] {
        let Some(first) = self.stops.first() else {
            return [0, 0, 0, 0];
        };
        if t <= first.0 {
            return first.1.to_array();
        }
        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let span = t1 - t0;
                let local = if span <= 0.0 { 1.0 } else { (t - t0) / span };
                let (a, b) = (c0.to_array(), c1.to_array());
                let mut out = [0u8; 4];
                for i in 0..4 {
                    let v = f32::from(a[i]) + (f32::from(b[i]) - f32::from(a[i])) * local;
                    out[i] = v.round().clamp(0.0, 255.0) as u8;
                }
                return out;
            }
        }
        self.stops[self.stops.len() - 1].1.to_array()
    }

    fn param_at(&self, coord: f64) -> f32 {
        let span = self.end - self.start;
        if span.abs() < f64::EPSILON {
            return if coord < self.start { 0.0 } else { 1.0 };
        }
        ((coord - self.start) / span) as f32
    }

    /// Paint the gradient over the whole canvas.
    pub fn paint(&self, canvas: Canvas) -> Surface {
        self.paint_in(canvas, canvas.rect())
    }

    /// Paint the gradient into the pixels whose centers fall inside `region`.
    pub fn paint_in(&self, canvas: Canvas, region: Rect) -> Surface {
        let mut out = Surface::new(canvas);
        let w = canvas.width as usize;
        for y in 0..canvas.height {
            let cy = f64::from(y) + 0.5;
            if cy < region.y0 || cy >= region.y1 {
                continue;
            }
            let row_px =
                (self.axis == GradientAxis::Vertical).then(|| self.color_at(self.param_at(cy)));
            for x in 0..canvas.width {
                let cx = f64::from(x) + 0.5;
                if cx < region.x0 || cx >= region.x1 {
                    continue;
                }
                let px = match row_px {
                    Some(px) => px,
                    None => self.color_at(self.param_at(cx)),
                };
                let i = ((y as usize) * w + (x as usize)) * 4;
                out.data[i..i + 4].copy_from_slice(&px);
            }
        }
        out
    }
}

/// Run `draw` against a fresh `vello_cpu` context and read the result back as a surface.
pub(crate) fn rasterize_with(
    canvas: Canvas,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) -> GlazeResult<Surface> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| GlazeError::validation("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| GlazeError::validation("surface height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    draw(&mut ctx);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Surface::from_premul_bytes(canvas.width, canvas.height, pixmap.data_as_u8_slice().to_vec())
}

pub(crate) fn cpu_color(color: Color, alpha: f32) -> vello_cpu::peniko::Color {
    let a = crate::foundation::math::unit_to_u8(alpha);
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, a)
}

/// Filled axis-aligned ellipse.
pub fn fill_ellipse(
    canvas: Canvas,
    center: Point,
    rx: f64,
    ry: f64,
    color: Color,
    alpha: f32,
) -> GlazeResult<Surface> {
    use vello_cpu::kurbo::Shape as _;

    rasterize_with(canvas, |ctx| {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let e = vello_cpu::kurbo::Ellipse::new((center.x, center.y), (rx, ry), 0.0);
        ctx.set_paint(cpu_color(color, alpha));
        ctx.fill_path(&e.to_path(0.1));
    })
}

/// Stroked rectangle outline, centered on `rect`'s edges.
pub fn stroke_rect(
    canvas: Canvas,
    rect: Rect,
    width: f64,
    color: Color,
    alpha: f32,
) -> GlazeResult<Surface> {
    rasterize_with(canvas, |ctx| {
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        ctx.set_paint(cpu_color(color, alpha));
        ctx.stroke_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/paint.rs"]
mod tests;
