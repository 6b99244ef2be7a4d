use super::*;
use crate::pixel::layout::compute_raster_spec;
use crate::pixel::{LINE_HEIGHT, PADDING, SpikeDirection};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuSurface;
use crate::render::recording::RecordingSurface;

fn subpaths(path: &BezPath) -> usize {
    path.elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count()
}

#[test]
fn speech_program_order_and_shapes() {
    let spec = compute_raster_spec("Hi\nThere", SpikeDirection::Left, false);
    let ops = draw_program(&spec);
    assert_eq!(ops.len(), 5);

    let DrawOp::FillStrokePath { path, line_width, .. } = &ops[0] else {
        panic!("grid first");
    };
    assert_eq!(subpaths(path), 14 * 8);
    assert_eq!(*line_width, PIXEL_SCALE);

    assert_eq!(
        ops[1],
        DrawOp::StrokeRect {
            rect: Rect::new(0.0, 0.0, 65.0, 35.0),
            stroke: Rgba8::BLACK,
            line_width: PIXEL_SCALE,
        }
    );

    let DrawOp::FillStrokePath { path, .. } = &ops[2] else {
        panic!("spike third");
    };
    // Open polyline: move plus two lines.
    assert_eq!(path.elements().len(), 3);

    let DrawOp::Text { origin, text, .. } = &ops[4] else {
        panic!("text last");
    };
    assert_eq!(text, "There");
    assert_eq!(origin.y, PADDING + LINE_HEIGHT + PIXEL_SCALE);
}

#[test]
fn outline_snaps_partial_cells() {
    assert_eq!(
        snapped_outline(Rect::new(0.0, 25.0, 72.0, 48.0)),
        Rect::new(0.0, 25.0, 70.0, 45.0)
    );
}

#[test]
fn thought_program_emits_two_circles() {
    let spec = compute_raster_spec("Hello", SpikeDirection::Left, true);
    let circles = draw_program(&spec)
        .into_iter()
        .filter(|op| matches!(op, DrawOp::FillStrokeCircle { .. }))
        .count();
    assert_eq!(circles, 2);
}

#[test]
fn render_resizes_before_drawing() {
    let mut surface = RecordingSurface::new();
    let big = compute_raster_spec("Hello there\nfriend", SpikeDirection::Left, false);
    let small = compute_raster_spec("Hi", SpikeDirection::Left, false);

    render(&big, &mut surface).unwrap();
    let big_ops = surface.ops().len();
    render(&small, &mut surface).unwrap();

    assert_eq!(surface.resize_count(), 2);
    assert_eq!(surface.dimensions(), (small.canvas_width, small.canvas_height));
    assert_eq!(surface.ops().len(), draw_program(&small).len());
    assert!(big_ops > surface.ops().len());
}

#[test]
fn cpu_render_paints_body_and_text() {
    let spec = compute_raster_spec("Hi", SpikeDirection::Left, false);
    let mut surface = CpuSurface::default();
    render(&spec, &mut surface).unwrap();
    let frame: FrameRGBA = surface.snapshot();
    assert_eq!((frame.width, frame.height), (spec.canvas_width, spec.canvas_height));
    // Bottom-right corner is outside the body and spike.
    assert_eq!(frame.pixel(frame.width - 1, frame.height - 1), Some([0, 0, 0, 0]));
    // Body interior is covered.
    assert_eq!(frame.pixel(12, 12).map(|px| px[3]), Some(255));
}
