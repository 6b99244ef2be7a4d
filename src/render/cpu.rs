use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect, Rgba8};
use crate::foundation::error::{BubbleError, BubbleResult};
use crate::render::backend::{DrawOp, FrameRGBA, RasterSurface, RenderSettings};

/// [`RasterSurface`] backed by `vello_cpu`.
///
/// Draw ops are recorded into a retained render context and rasterized into a fresh pixmap on
/// every [`RasterSurface::snapshot`].
pub struct CpuSurface {
    settings: RenderSettings,
    width: u16,
    height: u16,
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuSurface {
    /// Create an empty `0x0` surface.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            width: 0,
            height: 0,
            ctx: None,
        }
    }

    /// Create a surface and size it immediately.
    pub fn with_size(settings: RenderSettings, width: u32, height: u32) -> BubbleResult<Self> {
        let mut surface = Self::new(settings);
        surface.resize(width, height)?;
        Ok(surface)
    }
}

impl Default for CpuSurface {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl RasterSurface for CpuSurface {
    fn resize(&mut self, width: u32, height: u32) -> BubbleResult<()> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| BubbleError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| BubbleError::render("surface height exceeds u16"))?;

        self.width = width_u16;
        self.height = height_u16;
        self.ctx = if width_u16 == 0 || height_u16 == 0 {
            None
        } else {
            let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
            if let Some([r, g, b, a]) = self.settings.clear_rgba {
                ctx.set_paint(color_to_cpu(Rgba8::rgba(r, g, b, a)));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(width_u16),
                    f64::from(height_u16),
                ));
            }
            Some(ctx)
        };
        tracing::trace!(width, height, "cpu surface resized");
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn draw(&mut self, op: &DrawOp) {
        if let Some(ctx) = self.ctx.as_mut() {
            draw_op(ctx, op);
        }
    }

    fn snapshot(&mut self) -> FrameRGBA {
        let Some(ctx) = self.ctx.as_mut() else {
            return FrameRGBA::transparent(u32::from(self.width), u32::from(self.height));
        };
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    match op {
        DrawOp::StrokeRect {
            rect,
            stroke,
            line_width,
        } => {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*line_width));
            ctx.set_paint(color_to_cpu(*stroke));
            ctx.stroke_rect(&rect_to_cpu(*rect));
        }
        DrawOp::FillStrokeCircle {
            center,
            radius,
            fill,
            stroke,
            line_width,
        } => {
            let path = kurbo::Circle::new(*center, *radius).to_path(0.1);
            fill_stroke_path(ctx, &path, *fill, *stroke, *line_width);
        }
        DrawOp::FillStrokePath {
            path,
            fill,
            stroke,
            line_width,
        } => fill_stroke_path(ctx, path, *fill, *stroke, *line_width),
        DrawOp::Text {
            origin,
            text,
            color,
            font_size,
            advance,
        } => {
            ctx.set_paint(color_to_cpu(*color));
            for cell in block_glyph_cells(*origin, text, *font_size, *advance) {
                ctx.fill_rect(&rect_to_cpu(cell));
            }
        }
    }
}

fn fill_stroke_path(
    ctx: &mut vello_cpu::RenderContext,
    path: &BezPath,
    fill: Rgba8,
    stroke: Rgba8,
    line_width: f64,
) {
    let cpu_path = bezpath_to_cpu(path);
    ctx.set_paint(color_to_cpu(fill));
    ctx.fill_path(&cpu_path);
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line_width));
    ctx.set_paint(color_to_cpu(stroke));
    ctx.stroke_path(&cpu_path);
}

/// Cells of the block glyphs for one text run.
///
/// Each non-whitespace character becomes one solid cell, half an advance wide and as tall as the
/// largest multiple of that width that fits in `font_size`.
pub(crate) fn block_glyph_cells(
    origin: Point,
    text: &str,
    font_size: f64,
    advance: f64,
) -> Vec<Rect> {
    let cell_w = advance / 2.0;
    if !(cell_w > 0.0) || !(font_size > 0.0) {
        return Vec::new();
    }
    let cell_h = ((font_size / cell_w).floor() * cell_w).max(cell_w);
    text.chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(i, _)| {
            let x = origin.x + i as f64 * advance;
            Rect::new(x, origin.y, x + cell_w, origin.y + cell_h)
        })
        .collect()
}

pub(crate) fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba_premul: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba_premul);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
