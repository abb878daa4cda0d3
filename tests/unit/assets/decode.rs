use std::io::Cursor;

use super::*;

fn encode_png(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_reference_keeps_first_row_opaque() {
    let src = vec![
        10u8, 20, 30, 255, 40, 50, 60, 0, 70, 80, 90, 128, //
        1, 1, 1, 255, 2, 2, 2, 255, 3, 3, 3, 255,
    ];
    let img = image::RgbaImage::from_raw(3, 2, src).unwrap();

    let reference = decode_reference_image(&encode_png(img)).unwrap();
    assert_eq!(reference.width(), 3);
    assert_eq!(reference.pixel(0), Rgba8Premul::opaque(10, 20, 30));
    assert_eq!(reference.pixel(1), Rgba8Premul::opaque(40, 50, 60));
    assert_eq!(reference.pixel(2), Rgba8Premul::opaque(70, 80, 90));
}

#[test]
fn one_pixel_wide_reference_is_degenerate() {
    let img = image::RgbaImage::from_raw(1, 1, vec![0, 0, 0, 255]).unwrap();
    let err = decode_reference_image(&encode_png(img)).unwrap_err();
    assert!(matches!(err, LollipopError::GeometryDegenerate(_)));
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_reference_image(b"not an image").is_err());
}

#[test]
fn missing_files_are_resource_missing() {
    let err = load_reference_image(Path::new("no/such/palette.png")).unwrap_err();
    assert!(matches!(err, LollipopError::ResourceMissing(_)));
    assert!(err.to_string().contains("palette.png"));

    let err = load_font(Path::new("no/such/font.ttf")).unwrap_err();
    assert!(matches!(err, LollipopError::ResourceMissing(_)));
}
