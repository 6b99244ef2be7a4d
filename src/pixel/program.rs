use crate::foundation::core::{BezPath, Rect, Rgba8};
use crate::foundation::error::BubbleResult;
use crate::pixel::layout::{Ornament, PixelRenderSpec};
use crate::pixel::{CHAR_ADVANCE, FONT_SIZE, PIXEL_SCALE};
use crate::render::backend::{DrawOp, RasterSurface};

const FILL: Rgba8 = Rgba8::WHITE;
const STROKE: Rgba8 = Rgba8::BLACK;
const TEXT: Rgba8 = Rgba8::BLACK;

/// Ordered draw operations for `spec`: body grid, outline, ornament, then text lines.
pub fn draw_program(spec: &PixelRenderSpec) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(4 + spec.text_lines.len());

    ops.push(DrawOp::FillStrokePath {
        path: cell_grid(spec.body),
        fill: FILL,
        stroke: STROKE,
        line_width: PIXEL_SCALE,
    });
    ops.push(DrawOp::StrokeRect {
        rect: snapped_outline(spec.body),
        stroke: STROKE,
        line_width: PIXEL_SCALE,
    });

    match spec.ornament {
        Ornament::Thought { small, large } => {
            for c in [small, large] {
                ops.push(DrawOp::FillStrokeCircle {
                    center: c.center,
                    radius: c.radius,
                    fill: FILL,
                    stroke: STROKE,
                    line_width: PIXEL_SCALE,
                });
            }
        }
        Ornament::Spike {
            base_left,
            tip,
            base_right,
        } => {
            let mut path = BezPath::new();
            path.move_to(base_left);
            path.line_to(tip);
            path.line_to(base_right);
            ops.push(DrawOp::FillStrokePath {
                path,
                fill: FILL,
                stroke: STROKE,
                line_width: PIXEL_SCALE,
            });
        }
    }

    for (i, line) in spec.text_lines.iter().enumerate() {
        ops.push(DrawOp::Text {
            origin: spec.line_origin(i),
            text: line.clone(),
            color: TEXT,
            font_size: FONT_SIZE,
            advance: CHAR_ADVANCE,
        });
    }
    ops
}

/// Size `surface` to the canvas of `spec`, which clears it, then draw the program.
pub fn render(spec: &PixelRenderSpec, surface: &mut dyn RasterSurface) -> BubbleResult<()> {
    surface.resize(spec.canvas_width, spec.canvas_height)?;
    for op in draw_program(spec) {
        surface.draw(&op);
    }
    Ok(())
}

/// One closed square subpath per `PIXEL_SCALE` cell starting inside `body`.
fn cell_grid(body: Rect) -> BezPath {
    let mut path = BezPath::new();
    let (w, h) = (body.width(), body.height());
    let mut i = 0.0;
    while i < w {
        let mut j = 0.0;
        while j < h {
            let x = body.x0 + i;
            let y = body.y0 + j;
            path.move_to((x, y));
            path.line_to((x + PIXEL_SCALE, y));
            path.line_to((x + PIXEL_SCALE, y + PIXEL_SCALE));
            path.line_to((x, y + PIXEL_SCALE));
            path.close_path();
            j += PIXEL_SCALE;
        }
        i += PIXEL_SCALE;
    }
    path
}

/// Outline shortened by the remainder modulo `PIXEL_SCALE`, or one full cell when it divides evenly.
fn snapped_outline(body: Rect) -> Rect {
    let snap = |len: f64| {
        let rem = len % PIXEL_SCALE;
        len - if rem == 0.0 { PIXEL_SCALE } else { rem }
    };
    Rect::new(
        body.x0,
        body.y0,
        body.x0 + snap(body.width()),
        body.y0 + snap(body.height()),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/program.rs"]
mod tests;
