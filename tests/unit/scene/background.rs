use std::io::Cursor;

use super::*;

fn png_bytes(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn accepts_jpeg_png_webp_mime_types() {
    for mime in ["image/jpeg", "image/png", "image/webp", "IMAGE/PNG"] {
        assert!(BackgroundImage::from_bytes(vec![], mime).is_ok(), "{mime}");
    }
}

#[test]
fn rejects_other_types_with_user_message() {
    for mime in ["image/gif", "text/plain", ""] {
        let err = BackgroundImage::from_bytes(vec![1, 2, 3], mime).unwrap_err();
        assert!(matches!(err, BubbleError::UnsupportedImage(_)));
        assert!(err.to_string().contains("JPG, PNG, or WEBP"));
    }
}

#[test]
fn rejects_unknown_extension_before_reading() {
    let err = BackgroundImage::from_path("does-not-exist.gif").unwrap_err();
    assert!(matches!(err, BubbleError::UnsupportedImage(_)));
}

#[test]
fn decode_premultiplies() {
    let bg = BackgroundImage::from_bytes(png_bytes([100, 50, 200, 128]), "image/png").unwrap();
    let decoded = bg.decode().unwrap();
    assert_eq!((decoded.width, decoded.height), (1, 1));
    assert_eq!(
        decoded.rgba8_premul,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn dimensions_come_from_the_header() {
    let img = image::RgbaImage::from_pixel(7, 3, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let bg = BackgroundImage::from_bytes(buf, "image/png").unwrap();
    assert_eq!(bg.dimensions().unwrap(), (7, 3));
    let decoded = bg.decode().unwrap();
    assert_eq!((decoded.width, decoded.height), (7, 3));
}

#[test]
fn dimensions_of_garbage_is_an_error() {
    let bg = BackgroundImage::from_bytes(b"not a png".to_vec(), "image/png").unwrap();
    assert!(bg.dimensions().is_err());
}
