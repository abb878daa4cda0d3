use kurbo::Shape;

use super::*;

fn polyline(points: &[(f64, f64)]) -> BezPath {
    let mut p = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        p.move_to(*first);
    }
    for pt in it {
        p.line_to(*pt);
    }
    p
}

#[test]
fn stride_selects_every_fifth_point() {
    let pts: Vec<(f64, f64)> = (0..12).map(|i| (f64::from(i) * 100.0, 0.0)).collect();
    let sampler = NutSampler::new(&polyline(&pts), 5, 12.0, 10.0);
    let centers: Vec<Point> = sampler.anchors().map(|r| r.center()).collect();
    assert_eq!(
        centers,
        vec![
            Point::new(0.0, 0.0),
            Point::new(500.0, 0.0),
            Point::new(1000.0, 0.0)
        ]
    );
}

#[test]
fn close_candidates_are_skipped() {
    // Indices 0, 5, 10 are candidates; 5 sits 3 units from 0.
    let mut pts: Vec<(f64, f64)> = vec![(0.0, 0.0); 11];
    for (i, p) in pts.iter_mut().enumerate() {
        p.0 = i as f64 * 0.6;
    }
    pts[10] = (50.0, 0.0);
    let sampler = NutSampler::new(&polyline(&pts), 5, 12.0, 10.0);
    let centers: Vec<Point> = sampler.anchors().map(|r| r.center()).collect();
    assert_eq!(centers, vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)]);
}

#[test]
fn accepted_anchors_respect_min_spacing_on_curves() {
    let circle = kurbo::Circle::new((200.0, 200.0), 150.0).to_path(0.1);
    let sampler = NutSampler::new(&circle, 5, 12.0, 35.0);
    let centers: Vec<Point> = sampler.anchors().map(|r| r.center()).collect();
    assert!(centers.len() >= 2);
    for pair in centers.windows(2) {
        assert!(pair[0].distance(pair[1]) > 12.0);
    }
}

#[test]
fn anchors_are_restartable_and_sized_by_diameter() {
    let circle = kurbo::Circle::new((0.0, 0.0), 80.0).to_path(0.1);
    let sampler = NutSampler::new(&circle, 5, 12.0, 20.0);
    let first: Vec<Rect> = sampler.anchors().collect();
    let second: Vec<Rect> = sampler.anchors().collect();
    assert_eq!(first, second);
    for r in &first {
        assert!((r.width() - 20.0).abs() < 1e-9);
        assert!((r.height() - 20.0).abs() < 1e-9);
    }
}

#[test]
fn empty_path_has_no_anchors() {
    let sampler = NutSampler::new(&BezPath::new(), 5, 12.0, 20.0);
    assert!(sampler.points().is_empty());
    assert_eq!(sampler.anchors().count(), 0);
}
