use super::*;
use crate::encode::InMemorySink;
use crate::render::recording::RecordingSurface;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn add_and_remove_keep_controllers_in_step() {
    let mut studio = Studio::default();
    let a = studio.add_bubble("rect-tail-down");
    let b = studio.add_bubble("cloud");
    assert_eq!(studio.store().len(), 2);
    assert!(studio.controller(&a).is_some());

    let removed = studio.remove_bubble(&a).unwrap();
    assert_eq!(removed.id, a);
    assert!(studio.controller(&a).is_none());
    assert!(studio.controller(&b).is_some());
    assert!(!studio.pointer_event(&a, &PointerInput::PointerUp));
}

#[test]
fn drag_through_the_studio_moves_the_bubble() {
    let mut studio = Studio::default();
    let id = studio.add_bubble("rect-tail-down");
    let start = Point::new(100.0, 90.0);

    let (hit, target) = studio.hit_test(start).unwrap();
    assert_eq!(hit, id);
    assert_eq!(target, HitTarget::Body);

    studio.pointer_event(&id, &PointerInput::PointerDown { target, at: start });
    assert!(studio.pointer_event(
        &id,
        &PointerInput::PointerMove {
            at: Point::new(130.0, 100.0)
        }
    ));
    studio.pointer_event(&id, &PointerInput::PointerUp);

    let b = studio.store().get(&id).unwrap();
    assert_eq!((b.x, b.y), (80.0, 60.0));
}

#[test]
fn hit_test_prefers_the_topmost_bubble() {
    let mut studio = Studio::default();
    let _below = studio.add_bubble("rect");
    let above = studio.add_bubble("rect");
    let (hit, _) = studio.hit_test(Point::new(60.0, 60.0)).unwrap();
    assert_eq!(hit, above);
    assert!(studio.hit_test(Point::new(900.0, 900.0)).is_none());
}

#[test]
fn hit_test_covers_tail_and_protruding_handle() {
    let mut studio = Studio::default();
    let id = studio.add_bubble("rect-tail-down");

    // Below the body (50..130), inside the down tail.
    let (hit, target) = studio.hit_test(Point::new(125.0, 140.0)).unwrap();
    assert_eq!(hit, id);
    assert_eq!(target, HitTarget::Body);

    // Handle is centered on the body corner (200, 130) and sticks out past it.
    let (_, target) = studio.hit_test(Point::new(204.0, 134.0)).unwrap();
    assert_eq!(target, HitTarget::ResizeHandle);

    assert!(studio.hit_test(Point::new(125.0, 175.0)).is_none());
}

#[test]
fn update_of_unknown_bubble_is_ignored() {
    let mut studio = Studio::default();
    let id = studio.add_bubble("rect-tail-down");
    studio.remove_bubble(&id);
    assert!(!studio.update_bubble(&BubblePatch::new(id).text("gone")));
    assert!(studio.store().is_empty());
}

#[test]
fn unsupported_drop_leaves_background_alone() {
    let mut studio = Studio::default();
    studio.drop_file(png_bytes(4, 4), "image/png").unwrap();
    let err = studio.drop_file(b"%PDF".to_vec(), "application/pdf").unwrap_err();
    assert!(err.to_string().contains("unsupported image"));
    assert_eq!(studio.background().unwrap().bytes(), png_bytes(4, 4).as_slice());
}

#[test]
fn still_export_is_a_png_of_the_pixel_bubble() {
    let mut studio = Studio::default();
    let spec = studio.stage().spec();
    let dl = studio.export_still().unwrap();
    assert_eq!(dl.filename, STILL_FILENAME);
    assert_eq!(dl.mime, "image/png");

    let img = image::load_from_memory(&dl.bytes).unwrap();
    assert_eq!(img.width(), spec.canvas_width);
    assert_eq!(img.height(), spec.canvas_height);
}

#[test]
fn animated_export_feeds_six_frames_to_the_sink() {
    let mut studio = Studio::default();
    studio.set_pixel_settings(PixelBubbleSettings {
        text: "Hi".to_owned(),
        ..PixelBubbleSettings::default()
    });
    let mut sink = InMemorySink::new();
    let dl = studio.export_animated(&mut sink).unwrap();

    assert_eq!(dl.filename, ANIMATED_FILENAME);
    assert!(sink.ended());
    assert_eq!(sink.frames().len(), 6);
    assert_eq!(studio.stage().animation_text(), None);
    assert_eq!(studio.stage().effective_text(), "Hi");
}

#[test]
fn gif_export_is_a_gif() {
    let mut studio = Studio::default();
    let dl = studio.export_gif().unwrap();
    assert_eq!(dl.filename, ANIMATED_FILENAME);
    assert_eq!(dl.mime, "image/gif");
    assert!(dl.bytes.starts_with(b"GIF89a"));
}

#[test]
fn animated_export_without_surface_fails_and_skips_sink() {
    let stage = PixelStage::new(PixelBubbleSettings::default());
    let mut studio = Studio::with_stage(stage, StudioOpts::default());
    let mut sink = InMemorySink::new();
    assert!(studio.export_animated(&mut sink).is_err());
    assert!(sink.config().is_none());
}

#[test]
fn recording_stage_can_back_a_studio() {
    let stage = PixelStage::with_surface(
        PixelBubbleSettings::default(),
        Box::new(RecordingSurface::new()),
    );
    let mut studio = Studio::with_stage(stage, StudioOpts::default());
    let frame = studio.render_pixel().unwrap();
    let spec = studio.stage().spec();
    assert_eq!((frame.width, frame.height), (spec.canvas_width, spec.canvas_height));
}

#[test]
fn overlay_size_follows_options_then_background_then_bubbles() {
    let mut studio = Studio::default();
    assert_eq!(studio.overlay_size().unwrap(), (1, 1));

    studio.add_bubble("rect-tail-down");
    // 50 + 150 + 20 wide, 50 + 80 + 20 tail + 20 tall.
    assert_eq!(studio.overlay_size().unwrap(), (220, 170));

    studio.drop_file(png_bytes(64, 48), "image/png").unwrap();
    assert_eq!(studio.overlay_size().unwrap(), (64, 48));

    let mut fixed = Studio::new(StudioOpts {
        overlay_size: Some((300, 200)),
        ..StudioOpts::default()
    });
    fixed.add_bubble("rect-tail-down");
    assert_eq!(fixed.overlay_size().unwrap(), (300, 200));

    let dl = fixed.export_overlay().unwrap();
    assert_eq!(dl.filename, OVERLAY_FILENAME);
    let img = image::load_from_memory(&dl.bytes).unwrap();
    assert_eq!((img.width(), img.height()), (300, 200));
}
