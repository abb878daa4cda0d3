use super::*;

#[test]
fn premul_bytes_roundtrip_through_surface() {
    let bytes = vec![
        255u8, 0, 0, 255, 0, 128, 0, 128, //
        0, 0, 0, 0, 10, 20, 30, 255,
    ];
    let s = Surface::from_premul_bytes(&bytes, 2, 2).unwrap();
    assert_eq!((s.width(), s.height()), (2, 2));
    assert_eq!(s.premul_bytes(), bytes.as_slice());
    assert_eq!(s.pixel(1, 0), Rgba8Premul { r: 0, g: 128, b: 0, a: 128 });
    assert_eq!(s.pixel(5, 5), Rgba8Premul::transparent());

    let frame = s.into_frame();
    assert!(frame.premultiplied);
    assert_eq!(frame.data, bytes);
}

#[test]
fn byte_length_mismatch_is_rejected() {
    assert!(Surface::from_premul_bytes(&[0u8; 12], 2, 2).is_err());
    assert!(Surface::from_premul_bytes(&[], 0, 2).is_err());
}

#[test]
fn clear_fills_every_pixel() {
    let canvas = Canvas::new(8, 4).unwrap();
    let s = render_with(canvas, |ctx| {
        clear(ctx, canvas, Rgba8Premul::opaque(10, 200, 30));
        Ok(())
    })
    .unwrap();
    for y in 0..4 {
        for x in 0..8 {
            assert_eq!(s.pixel(x, y), Rgba8Premul::opaque(10, 200, 30));
        }
    }
}

#[test]
fn bezpath_conversion_keeps_elements() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((1.0, 0.0));
    p.quad_to((2.0, 1.0), (3.0, 0.0));
    p.curve_to((4.0, 1.0), (5.0, 1.0), (6.0, 0.0));
    p.close_path();
    assert_eq!(bezpath_to_cpu(&p).elements().len(), p.elements().len());
}
