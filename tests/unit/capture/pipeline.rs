use super::*;
use crate::encode::sink::InMemorySink;
use crate::pixel::PixelBubbleSettings;
use crate::render::cpu::CpuSurface;

fn stage() -> PixelStage {
    PixelStage::with_surface(PixelBubbleSettings::default(), Box::new(CpuSurface::default()))
}

#[test]
fn default_capture_alternates_six_frames() {
    let mut s = stage();
    let frames = FrameCapturePipeline::default().capture(&mut s).unwrap();
    assert_eq!(frames.len(), 6);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.text_visible, i % 2 == 0);
        assert_eq!(f.delay_ms, 300);
    }
    // Visible frames are sized for the real text, hidden ones for a single blank glyph.
    assert!(frames[0].frame.width > frames[1].frame.width);
    assert_eq!(frames[0].frame, frames[2].frame);
    assert_eq!(frames[1].frame, frames[3].frame);
    assert_eq!(s.animation_text(), None);
}

#[test]
fn missing_surface_aborts_without_sink_calls() {
    let mut s = PixelStage::new(PixelBubbleSettings::default());
    let mut sink = InMemorySink::new();
    let err = FrameCapturePipeline::default()
        .capture_into(&mut s, &mut sink)
        .unwrap_err();
    assert!(err.to_string().starts_with("capture error:"));
    assert!(sink.config().is_none());
    assert!(sink.frames().is_empty());
    assert!(!sink.ended());
}

#[test]
fn capture_into_submits_frames_in_order() {
    let mut s = stage();
    let mut sink = InMemorySink::new();
    let opts = CaptureOpts {
        cycles: 2,
        delay_ms: 120,
        ..CaptureOpts::default()
    };
    let blob = FrameCapturePipeline::new(opts)
        .capture_into(&mut s, &mut sink)
        .unwrap();

    let cfg = sink.config().unwrap();
    assert_eq!(cfg.frame_count, 4);
    let widest = sink.frames().iter().map(|(_, f)| f.frame.width).max().unwrap();
    assert_eq!(cfg.width, widest);
    let idx: Vec<_> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
    assert!(sink.frames().iter().all(|(_, f)| f.delay_ms == 120));
    assert!(sink.ended());
    let total: usize = sink.frames().iter().map(|(_, f)| f.frame.data.len()).sum();
    assert_eq!(blob.bytes.len(), total);
}

#[test]
fn stage_is_restored_after_capture() {
    let mut s = stage();
    let before = {
        let r = s.render().unwrap();
        s.snapshot(r).unwrap()
    };
    FrameCapturePipeline::default().capture(&mut s).unwrap();
    let after = {
        let r = s.render().unwrap();
        s.snapshot(r).unwrap()
    };
    assert_eq!(before, after);
}

#[test]
fn snapshots_are_independent_of_the_live_surface() {
    let mut s = stage();
    let frames = FrameCapturePipeline::default().capture(&mut s).unwrap();
    let first = frames[0].frame.clone();
    s.set_animation_text(Some("completely different".to_owned()));
    let r = s.render().unwrap();
    s.snapshot(r).unwrap();
    assert_eq!(frames[0].frame, first);
}

#[test]
fn capture_leaves_the_restored_frame_rendered() {
    let mut s = stage();
    let before = {
        let r = s.render().unwrap();
        s.snapshot(r).unwrap()
    };
    FrameCapturePipeline::default().capture(&mut s).unwrap();

    // No render call here: capture already redrew the surface for the restored state.
    let current = crate::capture::RenderReceipt {
        generation: s.generation(),
    };
    assert_eq!(s.snapshot(current).unwrap(), before);
}
