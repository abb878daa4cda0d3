use super::*;

#[test]
fn frame_sequence_numbers_are_one_based() {
    assert_eq!(FrameIndex(0).sequence_number(), 1);
    assert_eq!(FrameIndex(19).sequence_number(), 20);
}

#[test]
fn canvas_rejects_zero_and_oversized_raster() {
    assert!(Canvas::new(0, 10).is_err());
    let c = Canvas::new(70_000, 10).unwrap();
    assert!(c.raster_dims().is_err());
    assert_eq!(Canvas::new(1920, 1080).unwrap().raster_dims().unwrap(), (1920, 1080));
}

#[test]
fn complement_is_channelwise_and_involutive() {
    let c = Rgba8Premul::opaque(10, 200, 255);
    assert_eq!(c.complement(), Rgba8Premul::opaque(245, 55, 0));
    assert_eq!(c.complement().complement(), c);
}

#[test]
fn straight_to_premul_rounds() {
    let c = Rgba8Premul::from_straight_rgba(100, 50, 200, 128);
    assert_eq!(c.r, ((100u16 * 128 + 127) / 255) as u8);
    assert_eq!(c.a, 128);
    assert_eq!(Rgba8Premul::from_straight_rgba(1, 2, 3, 255), Rgba8Premul::opaque(1, 2, 3));
}
