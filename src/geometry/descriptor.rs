use serde::Serialize;

use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Size, Vec2};
use crate::geometry::palette::{DashPattern, DropShadow, Palette};
use crate::geometry::{
    BORDER_WIDTH, PADDING, RESIZE_HANDLE_SIZE, TAIL_HEIGHT, TAIL_WIDTH, TEXT_ADVANCE,
    TEXT_LINE_HEIGHT,
};
use crate::scene::style::{BodyShape, Border, BubbleStyle, Tail};

/// Drawable description of one vector bubble.
///
/// All coordinates are local to a viewport of size [`GeometryDescriptor::viewport`]. The viewport
/// is placed in the scene at `(x, y) - origin_offset`, which keeps the body anchored at the
/// instance position even when an up/left tail grows the viewport.
#[derive(Clone, Debug, Serialize)]
pub struct GeometryDescriptor {
    /// Viewport size, including room for the tail.
    pub viewport: Size,
    /// Closed body outline.
    pub body_path: BezPath,
    /// Closed tail triangle, if the style has a tail.
    pub tail_path: Option<BezPath>,
    /// Offset of the body's top-left corner inside the viewport.
    pub origin_offset: Vec2,
    /// Interior color.
    pub fill: Rgba8,
    /// Outline color.
    pub stroke: Rgba8,
    /// Outline width.
    pub stroke_width: f64,
    /// Dash pattern shared by body and tail strokes.
    pub dash_pattern: Option<DashPattern>,
    /// Shadow drawn beneath the bubble.
    pub drop_shadow: Option<DropShadow>,
    /// Area available for text. Width/height go negative for bodies smaller than the padding.
    pub text_area: Rect,
    /// Hit region of the resize handle.
    pub resize_handle: Rect,
}

impl GeometryDescriptor {
    /// Scene position of the viewport's top-left corner for a body anchored at `(x, y)`.
    pub fn placement(&self, x: f64, y: f64) -> Point {
        Point::new(x - self.origin_offset.x, y - self.origin_offset.y)
    }

    /// Whether `p` (viewport coordinates) hits the resize handle.
    pub fn hits_resize_handle(&self, p: Point) -> bool {
        let r = self.resize_handle;
        p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
    }

    /// Top-left of each line of `text`, with the block centered in the text area.
    ///
    /// Widths use the approximate [`TEXT_ADVANCE`] per character.
    pub fn text_line_origins(&self, text: &str) -> Vec<Point> {
        let area = self.text_area;
        let lines = text.lines().count();
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let block_w = widest as f64 * TEXT_ADVANCE;
        let block_h = lines as f64 * TEXT_LINE_HEIGHT;
        let x = area.x0 + (area.width() - block_w) / 2.0;
        let y = area.y0 + (area.height() - block_h) / 2.0;
        (0..lines)
            .map(|i| Point::new(x, y + i as f64 * TEXT_LINE_HEIGHT))
            .collect()
    }
}

/// Body edges in viewport coordinates, already inset by the border width.
#[derive(Clone, Copy, Debug)]
struct BodyFrame {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    mid_x: f64,
    mid_y: f64,
}

impl BodyFrame {
    fn new(width: f64, height: f64, offset: Vec2) -> Self {
        Self {
            left: offset.x + BORDER_WIDTH,
            top: offset.y + BORDER_WIDTH,
            right: offset.x + width - BORDER_WIDTH,
            bottom: offset.y + height - BORDER_WIDTH,
            mid_x: offset.x + width / 2.0,
            mid_y: offset.y + height / 2.0,
        }
    }
}

/// Compute the drawable geometry for a `width` x `height` body in `style`.
///
/// Never fails: zero or negative sizes produce degenerate but well-formed paths.
#[tracing::instrument(level = "trace", skip(style), fields(style = %style))]
pub fn compute_geometry(width: f64, height: f64, style: &BubbleStyle) -> GeometryDescriptor {
    let (viewport, origin_offset) = match style.tail {
        Tail::None => (Size::new(width, height), Vec2::ZERO),
        Tail::Down => (Size::new(width, height + TAIL_HEIGHT), Vec2::ZERO),
        Tail::Up => (
            Size::new(width, height + TAIL_HEIGHT),
            Vec2::new(0.0, TAIL_HEIGHT),
        ),
        Tail::Right => (Size::new(width + TAIL_WIDTH, height), Vec2::ZERO),
        Tail::Left => (
            Size::new(width + TAIL_WIDTH, height),
            Vec2::new(TAIL_WIDTH, 0.0),
        ),
    };

    let frame = BodyFrame::new(width, height, origin_offset);
    let body_path = match style.shape {
        BodyShape::Rect => rect_body(&frame),
        BodyShape::Cloud => cloud_body(&frame),
    };
    let tail_path = tail_triangle(style.tail, width, height);

    let palette = Palette::for_style(style);
    let dash_pattern = (style.border == Border::Dashed).then_some(DashPattern::STANDARD);
    let drop_shadow = style.sticker.then_some(DropShadow::STICKER);

    let text_x = origin_offset.x + PADDING;
    let text_y = origin_offset.y + PADDING;
    let text_area = Rect::new(
        text_x,
        text_y,
        text_x + width - 2.0 * BORDER_WIDTH - 2.0 * PADDING,
        text_y + height - 2.0 * BORDER_WIDTH - 2.0 * PADDING,
    );

    let half = RESIZE_HANDLE_SIZE / 2.0;
    let corner = Point::new(origin_offset.x + width, origin_offset.y + height);
    let resize_handle = Rect::new(
        corner.x - half,
        corner.y - half,
        corner.x + half,
        corner.y + half,
    );

    GeometryDescriptor {
        viewport,
        body_path,
        tail_path,
        origin_offset,
        fill: palette.fill,
        stroke: palette.stroke,
        stroke_width: BORDER_WIDTH,
        dash_pattern,
        drop_shadow,
        text_area,
        resize_handle,
    }
}

fn rect_body(f: &BodyFrame) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((f.left, f.top));
    p.line_to((f.right, f.top));
    p.line_to((f.right, f.bottom));
    p.line_to((f.left, f.bottom));
    p.close_path();
    p
}

/// Four quadratic arcs through the edge midpoints, each controlled by a body corner.
fn cloud_body(f: &BodyFrame) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((f.left, f.mid_y));
    p.quad_to((f.left, f.top), (f.mid_x, f.top));
    p.quad_to((f.right, f.top), (f.right, f.mid_y));
    p.quad_to((f.right, f.bottom), (f.mid_x, f.bottom));
    p.quad_to((f.left, f.bottom), (f.left, f.mid_y));
    p.close_path();
    p
}

/// Tail triangle. The base sits `1.5 * BORDER_WIDTH` inside the body edge and the apex stops
/// `2 * BORDER_WIDTH` short of the viewport edge so the strokes overlap the body seam.
fn tail_triangle(tail: Tail, width: f64, height: f64) -> Option<BezPath> {
    let seam = BORDER_WIDTH * 1.5;
    let tip_inset = BORDER_WIDTH * 2.0;
    let half_base = TAIL_WIDTH / 2.0;
    let (cx, cy) = (width / 2.0, height / 2.0);

    let (a, apex, b) = match tail {
        Tail::None => return None,
        Tail::Down => (
            (cx - half_base, height - seam),
            (cx, height + TAIL_HEIGHT - tip_inset),
            (cx + half_base, height - seam),
        ),
        Tail::Up => (
            (cx - half_base, TAIL_HEIGHT + seam),
            (cx, tip_inset),
            (cx + half_base, TAIL_HEIGHT + seam),
        ),
        Tail::Left => (
            (TAIL_WIDTH + seam, cy - half_base),
            (tip_inset, cy),
            (TAIL_WIDTH + seam, cy + half_base),
        ),
        Tail::Right => (
            (width - seam, cy - half_base),
            (width + TAIL_WIDTH - tip_inset, cy),
            (width - seam, cy + half_base),
        ),
    };

    let mut p = BezPath::new();
    p.move_to(a);
    p.line_to(apex);
    p.line_to(b);
    p.close_path();
    Some(p)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/descriptor.rs"]
mod tests;
