use std::io::Cursor;
use std::time::Duration;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use super::*;
use crate::render::backend::FrameRGBA;

fn captured(w: u32, h: u32, px: [u8; 4], text_visible: bool) -> CapturedFrame {
    CapturedFrame {
        frame: FrameRGBA {
            width: w,
            height: h,
            data: px.repeat((w * h) as usize),
            premultiplied: true,
        },
        delay_ms: 300,
        text_visible,
    }
}

fn encode(frames: &[CapturedFrame], opts: GifSinkOpts) -> BubbleResult<EncodedBlob> {
    let mut sink = GifSink::new(opts);
    crate::capture::pipeline::submit(frames, &mut sink)
}

#[test]
fn frames_keep_order_size_and_delay() {
    let frames = [
        captured(8, 6, [255, 0, 0, 255], true),
        captured(4, 6, [0, 0, 255, 255], false),
    ];
    let blob = encode(&frames, GifSinkOpts::default()).unwrap();
    assert_eq!(blob.mime, "image/gif");
    assert!(blob.bytes.starts_with(b"GIF89a"));

    let decoded = GifDecoder::new(Cursor::new(blob.bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(decoded.len(), 2);
    for f in &decoded {
        assert_eq!(Duration::from(f.delay()), Duration::from_millis(300));
        assert_eq!(f.buffer().dimensions(), (8, 6));
    }
    let first = decoded[0].buffer().get_pixel(1, 1).0;
    assert!(first[0] > 200 && first[2] < 50);
    // The narrower frame is padded with the background.
    let padded = decoded[1].buffer().get_pixel(6, 1).0;
    assert!(padded[0] > 200 && padded[1] > 200 && padded[2] > 200);
}

#[test]
fn transparent_pixels_flatten_onto_background() {
    let frames = [captured(2, 2, [0, 0, 0, 0], true)];
    let opts = GifSinkOpts {
        background: [0, 0, 0],
        ..GifSinkOpts::default()
    };
    let blob = encode(&frames, opts).unwrap();
    let decoded = GifDecoder::new(Cursor::new(blob.bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    let px = decoded[0].buffer().get_pixel(0, 0).0;
    assert_eq!(px[3], 255);
    assert!(px[0] < 8 && px[1] < 8 && px[2] < 8);
}

#[test]
fn contract_violations_are_encode_errors() {
    let mut sink = GifSink::new(GifSinkOpts::default());
    let f = captured(2, 2, [0, 0, 0, 255], true);
    assert!(sink.push_frame(0, &f).is_err());
    assert!(sink.end().is_err());

    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        frame_count: 2,
    })
    .unwrap();
    let err = sink.push_frame(1, &f).unwrap_err();
    assert!(err.to_string().starts_with("encode error:"));
    sink.push_frame(0, &f).unwrap();
    assert!(sink.push_frame(1, &captured(3, 2, [0, 0, 0, 255], true)).is_err());

    assert!(
        sink.begin(SinkConfig {
            width: 0,
            height: 2,
            frame_count: 0,
        })
        .is_err()
    );
}
