use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [200, 200, 200, 200], 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0], 1.0), dst);
}

#[test]
fn over_opaque_src_replaces_dst() {
    let src = [255, 0, 0, 255];
    assert_eq!(over([0, 0, 0, 255], src, 1.0), src);
}

#[test]
fn over_onto_transparent_returns_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src, 1.0), src);
}

#[test]
fn over_in_place_rejects_length_mismatch() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn over_at_clips_negative_and_overflowing_offsets() {
    let mut dst = solid(4, 4, [0, 0, 0, 255]);
    let src = solid(3, 3, [255, 255, 255, 255]);

    over_at(&mut dst, &src, -2, 2).unwrap();
    assert_eq!(dst.pixel(0, 2), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(1, 2), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(0, 3), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 255]));

    over_at(&mut dst, &src, 10, 10).unwrap();
}

#[test]
fn silhouette_keeps_coverage() {
    let src = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![10, 200, 30, 255, 0, 0, 0, 0],
        premultiplied: true,
    };
    let s = silhouette(&src, [0, 0, 0, 255]);
    assert_eq!(s.data, vec![0, 0, 0, 255, 0, 0, 0, 0]);
}
