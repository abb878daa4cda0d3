use kurbo::{PathEl, Shape};

use super::*;
use crate::foundation::core::Canvas;
use crate::render::surface::{clear, render_with};

fn square() -> BezPath {
    Rect::new(100.0, 100.0, 300.0, 300.0).to_path(0.1)
}

fn subpaths(p: &BezPath) -> usize {
    p.elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count()
}

#[test]
fn decorations_only_touch_decorated_path() {
    let anchors = vec![
        Rect::new(90.0, 90.0, 110.0, 110.0),
        Rect::new(290.0, 290.0, 310.0, 310.0),
    ];
    let paths = GlyphPaths::build(square(), anchors);
    assert_eq!(paths.clean(), &square());
    assert_eq!(subpaths(paths.clean()), 1);
    assert_eq!(subpaths(paths.decorated()), 3);
    assert_eq!(
        &paths.decorated().elements()[..square().elements().len()],
        square().elements()
    );
}

#[test]
fn added_circle_is_inscribed_in_anchor() {
    let mut p = BezPath::new();
    let anchor = Rect::new(10.0, 20.0, 30.0, 40.0);
    add_decoration(anchor, &mut p);
    let bbox = p.bounding_box();
    assert!((bbox.x0 - 10.0).abs() < 0.5 && (bbox.x1 - 30.0).abs() < 0.5);
    assert!((bbox.y0 - 20.0).abs() < 0.5 && (bbox.y1 - 40.0).abs() < 0.5);
    assert!(matches!(p.elements().last(), Some(PathEl::ClosePath)));
}

#[test]
fn painted_nut_is_white_inside() {
    let canvas = Canvas::new(40, 40).unwrap();
    let s = render_with(canvas, |ctx| {
        clear(ctx, canvas, Rgba8Premul::BLACK);
        paint_decoration(Rect::new(5.0, 5.0, 35.0, 35.0), ctx);
        Ok(())
    })
    .unwrap();
    assert_eq!(s.pixel(20, 20), Rgba8Premul::WHITE);
    assert_eq!(s.pixel(1, 1), Rgba8Premul::BLACK);
}
