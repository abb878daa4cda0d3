use kurbo::Shape;

use super::*;
use crate::foundation::core::BezPath;

fn palette(n: usize) -> Vec<Rgba8Premul> {
    (0..n)
        .map(|i| Rgba8Premul::opaque((i * 40) as u8, 255 - (i * 40) as u8, 90))
        .collect()
}

#[test]
fn layers_shrink_by_double_stroke() {
    let layers = stroke_layers(&palette(6), 3, 6.0).unwrap();
    let widths: Vec<f64> = layers.iter().map(|l| l.width).collect();
    assert_eq!(widths, vec![36.0, 30.0, 24.0, 18.0, 12.0, 6.0]);
    assert_eq!(layers[0].color, palette(6)[0]);
    assert_eq!(layers[5].color, palette(6)[5]);
}

#[test]
fn default_layers_start_at_180() {
    let layers = stroke_layers(&palette(30), 15, 6.0).unwrap();
    assert_eq!(layers.len(), 30);
    assert_eq!(layers[0].width, 180.0);
    assert_eq!(layers[29].width, 6.0);
}

#[test]
fn short_palette_is_rejected() {
    assert!(stroke_layers(&palette(3), 2, 6.0).is_err());
    assert!(stroke_layers(&palette(3), 0, 6.0).is_err());
}

#[test]
fn thinner_layers_paint_over_wider_ones() {
    let canvas = Canvas::new(200, 200).unwrap();
    let clean: BezPath = Rect::new(80.0, 80.0, 120.0, 120.0).to_path(0.1);
    let paths = GlyphPaths::build(clean, std::iter::empty());
    let colors = vec![Rgba8Premul::opaque(255, 0, 0), Rgba8Premul::opaque(0, 0, 255)];
    let layers = stroke_layers(&colors, 1, 20.0).unwrap();

    let out = render_word(
        canvas,
        Rect::new(0.0, 80.0, 200.0, 120.0),
        &paths,
        &layers,
        std::iter::empty(),
    )
    .unwrap();
    assert_eq!(out.widest, 40.0);

    let s = &out.surface;
    // Outer ring: only the wide red pen reaches 15px outside the edge.
    assert_eq!(s.pixel(65, 100), Rgba8Premul::opaque(255, 0, 0));
    // On the edge the thin blue pen wins.
    assert_eq!(s.pixel(77, 100), Rgba8Premul::opaque(0, 0, 255));
    // Far away stays black.
    assert_eq!(s.pixel(5, 5), Rgba8Premul::BLACK);
    // Inside is the gradient: light at top, darker at bottom.
    let top = s.pixel(100, 84);
    let bottom = s.pixel(100, 116);
    assert!(top.r > bottom.r, "{top:?} vs {bottom:?}");
    assert!(top.r >= 230, "{top:?}");
    assert!((128..=150).contains(&bottom.r), "{bottom:?}");
}

#[test]
fn nuts_are_painted_last() {
    let canvas = Canvas::new(200, 200).unwrap();
    let clean: BezPath = Rect::new(80.0, 80.0, 120.0, 120.0).to_path(0.1);
    let anchor = Rect::from_center_size((100.0, 100.0), (20.0, 20.0));
    let paths = GlyphPaths::build(clean, [anchor]);
    let layers = stroke_layers(&[Rgba8Premul::opaque(255, 0, 0); 2], 1, 10.0).unwrap();

    let out = render_word(
        canvas,
        Rect::new(0.0, 80.0, 200.0, 120.0),
        &paths,
        &layers,
        [anchor],
    )
    .unwrap();
    assert_eq!(out.surface.pixel(100, 100), Rgba8Premul::WHITE);
}
