use kurbo::Shape;

use super::*;
use crate::geometry::palette::Palette;

fn style(tag: &str) -> BubbleStyle {
    BubbleStyle::parse(tag)
}

fn within(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

#[test]
fn paths_stay_inside_viewport_for_every_preset() {
    for (tag, _) in crate::scene::style::LIBRARY_PRESETS {
        for (w, h) in [(150.0, 80.0), (49.0, 25.0), (300.0, 41.0)] {
            let g = compute_geometry(w, h, &style(tag));
            let view = Rect::from_origin_size(Point::ORIGIN, g.viewport);
            assert!(within(view, g.body_path.bounding_box()), "{tag} body {w}x{h}");
            if let Some(tail) = &g.tail_path {
                assert!(within(view, tail.bounding_box()), "{tag} tail {w}x{h}");
            }
        }
    }
}

#[test]
fn up_tail_shifts_body_down_and_down_tail_does_not() {
    let up = compute_geometry(150.0, 80.0, &style("rect-tail-up"));
    let down = compute_geometry(150.0, 80.0, &style("rect-tail-down"));
    let up_box = up.body_path.bounding_box();
    let down_box = down.body_path.bounding_box();

    assert_eq!(up_box.y0, TAIL_HEIGHT + BORDER_WIDTH);
    assert_eq!(down_box.y0, BORDER_WIDTH);
    assert_eq!(up_box.width(), down_box.width());
    assert_eq!(up.viewport, Size::new(150.0, 100.0));
    assert_eq!(down.viewport, Size::new(150.0, 100.0));
    assert_eq!(up.origin_offset, Vec2::new(0.0, TAIL_HEIGHT));
    assert_eq!(down.origin_offset, Vec2::ZERO);
}

#[test]
fn left_tail_shifts_body_right() {
    let g = compute_geometry(150.0, 80.0, &style("cloud-tail-left"));
    assert_eq!(g.viewport, Size::new(170.0, 80.0));
    assert_eq!(g.origin_offset, Vec2::new(TAIL_WIDTH, 0.0));
    assert_eq!(g.body_path.bounding_box().x0, TAIL_WIDTH + BORDER_WIDTH);
    let tail = g.tail_path.unwrap().bounding_box();
    assert_eq!(tail.x0, 2.0 * BORDER_WIDTH);
    assert_eq!(tail.x1, TAIL_WIDTH + 1.5 * BORDER_WIDTH);
}

#[test]
fn right_tail_apex_reaches_past_body() {
    let g = compute_geometry(150.0, 80.0, &style("rect-tail-right"));
    let tail = g.tail_path.unwrap().bounding_box();
    assert_eq!(tail.x1, 150.0 + TAIL_WIDTH - 2.0 * BORDER_WIDTH);
    assert_eq!(tail.y0, 40.0 - TAIL_WIDTH / 2.0);
    assert_eq!(tail.y1, 40.0 + TAIL_WIDTH / 2.0);
}

#[test]
fn no_tail_means_no_tail_path() {
    let g = compute_geometry(150.0, 80.0, &style("cloud"));
    assert!(g.tail_path.is_none());
    assert_eq!(g.viewport, Size::new(150.0, 80.0));
}

#[test]
fn cloud_body_touches_edge_midpoints() {
    let g = compute_geometry(100.0, 60.0, &style("cloud"));
    let bb = g.body_path.bounding_box();
    assert!((bb.x0 - BORDER_WIDTH).abs() < 1e-9);
    assert!((bb.y0 - BORDER_WIDTH).abs() < 1e-9);
    assert!((bb.x1 - (100.0 - BORDER_WIDTH)).abs() < 1e-9);
    assert!((bb.y1 - (60.0 - BORDER_WIDTH)).abs() < 1e-9);
    // Four arcs plus move and close.
    assert_eq!(g.body_path.elements().len(), 6);
}

#[test]
fn palette_precedence() {
    let pick = |tag: &str| {
        let g = compute_geometry(150.0, 80.0, &style(tag));
        Palette {
            fill: g.fill,
            stroke: g.stroke,
        }
    };
    assert_eq!(pick("rect"), Palette::DEFAULT);
    assert_eq!(pick("rect-dashed"), Palette::MUTED);
    assert_eq!(pick("cloud"), Palette::CLOUD);
    assert_eq!(pick("cloud-dashed"), Palette::CLOUD);
    assert_eq!(pick("cloud-tail-down"), Palette::TAIL);
    assert_eq!(pick("rect-tail-up-dashed"), Palette::TAIL);
    assert_eq!(pick("sticker-rect"), Palette::STICKER);
    assert_eq!(pick("sticker-cloud-tail-left"), Palette::STICKER);
}

#[test]
fn dash_and_shadow_flags() {
    let dashed = compute_geometry(150.0, 80.0, &style("cloud-tail-down-dashed"));
    assert_eq!(dashed.dash_pattern, Some(DashPattern::STANDARD));
    assert!(dashed.drop_shadow.is_none());

    let sticker = compute_geometry(150.0, 80.0, &style("sticker-rect"));
    assert!(sticker.dash_pattern.is_none());
    assert_eq!(sticker.drop_shadow, Some(DropShadow::STICKER));
    assert_eq!(sticker.stroke_width, BORDER_WIDTH);
}

#[test]
fn text_area_and_resize_handle_follow_offset() {
    let g = compute_geometry(150.0, 80.0, &style("rect-tail-up"));
    assert_eq!(g.text_area, Rect::new(10.0, 30.0, 136.0, 86.0));
    assert_eq!(g.resize_handle, Rect::new(145.0, 95.0, 155.0, 105.0));
    assert!(g.hits_resize_handle(Point::new(150.0, 100.0)));
    assert!(!g.hits_resize_handle(Point::new(100.0, 60.0)));
    assert_eq!(g.placement(50.0, 50.0), Point::new(50.0, 30.0));
}

#[test]
fn degenerate_sizes_still_produce_descriptors() {
    for (w, h) in [(0.0, 0.0), (-20.0, 5.0), (3.0, -1.0)] {
        let g = compute_geometry(w, h, &style("sticker-cloud-tail-down-dashed"));
        assert!(g.body_path.elements().len() > 1);
        assert!(g.text_area.width() < 0.0);
    }
}

#[test]
fn unknown_tag_renders_like_default_rect() {
    let g = compute_geometry(150.0, 80.0, &style("banana-split"));
    let d = compute_geometry(150.0, 80.0, &BubbleStyle::default());
    assert_eq!(g.body_path, d.body_path);
    assert_eq!(g.fill, Palette::DEFAULT.fill);
}
