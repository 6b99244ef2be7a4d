use super::*;

#[test]
fn radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn constant_image_is_unchanged() {
    let (w, h) = (4u32, 3u32);
    let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn single_pixel_spreads_but_keeps_energy() {
    let (w, h) = (5u32, 5u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((2 * w + 2) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 4);
}

#[test]
fn rejects_mismatched_buffer_and_bad_sigma() {
    assert!(blur_rgba8_premul(&[0; 12], 2, 2, 1, 1.0).is_err());
    assert!(blur_rgba8_premul(&[0; 16], 2, 2, 1, 0.0).is_err());
}

#[test]
fn radius_covers_three_sigma() {
    assert_eq!(radius_for_std_dev(3.0), 9);
    assert_eq!(radius_for_std_dev(0.4), 2);
    assert_eq!(radius_for_std_dev(0.0), 0);
    assert_eq!(radius_for_std_dev(f64::NAN), 0);
}

#[test]
fn shadow_layer_is_offset_and_softened() {
    // Opaque 4x4 square in the top-left of a 12x12 frame.
    let mut bubble = FrameRGBA::transparent(12, 12);
    for y in 0..4 {
        for x in 0..4 {
            let i = ((y * 12 + x) * 4) as usize;
            bubble.data[i..i + 4].copy_from_slice(&[200, 40, 40, 255]);
        }
    }
    let shadow = DropShadow {
        dx: 4.0,
        dy: 4.0,
        std_dev: 1.0,
    };
    let layer = drop_shadow_layer(&bubble, &shadow).unwrap();

    assert_eq!((layer.width, layer.height), (12, 12));
    // Black, centered on the moved square.
    let center = layer.pixel(5, 5).unwrap();
    assert!(center[3] > 200);
    assert_eq!(&center[..3], &[0, 0, 0]);
    // The blur leaks just past the moved square but not back to the origin.
    assert!(layer.pixel(8, 5).unwrap()[3] > 0);
    assert_eq!(layer.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn zero_shadow_is_a_plain_silhouette() {
    let mut bubble = FrameRGBA::transparent(2, 1);
    bubble.data[..4].copy_from_slice(&[10, 20, 30, 128]);
    let shadow = DropShadow {
        dx: 0.0,
        dy: 0.0,
        std_dev: 0.0,
    };
    let layer = drop_shadow_layer(&bubble, &shadow).unwrap();
    assert_eq!(layer.pixel(0, 0), Some([0, 0, 0, 128]));
    assert_eq!(layer.pixel(1, 0), Some([0, 0, 0, 0]));
}
