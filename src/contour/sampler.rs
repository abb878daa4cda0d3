use crate::foundation::core::{BezPath, Point, Rect};

/// Flattening tolerance for the contour walk, in canvas pixels.
pub const FLATTEN_TOLERANCE: f64 = 1.0;

/// Flattened contour points of a glyph outline plus the nut placement rule.
///
/// [`NutSampler::anchors`] can be called any number of times; each call replays the same
/// sequence from the start.
#[derive(Clone, Debug)]
pub struct NutSampler {
    points: Vec<Point>,
    stride: usize,
    min_spacing: f64,
    diameter: f64,
}

impl NutSampler {
    pub fn new(clean: &BezPath, stride: usize, min_spacing: f64, diameter: f64) -> Self {
        Self {
            points: flattened_points(clean),
            stride: stride.max(1),
            min_spacing,
            diameter,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn anchors(&self) -> NutAnchors<'_> {
        NutAnchors {
            sampler: self,
            next: 0,
            last_accepted: None,
        }
    }
}

/// Lazy walk over [`NutSampler`] points yielding square anchor rects.
///
/// Index `i` is accepted when `i % stride == 0` and it lies farther than `min_spacing` from
/// the last accepted point.
#[derive(Clone, Debug)]
pub struct NutAnchors<'a> {
    sampler: &'a NutSampler,
    next: usize,
    last_accepted: Option<Point>,
}

impl Iterator for NutAnchors<'_> {
    type Item = Rect;

    fn next(&mut self) -> Option<Rect> {
        let s = self.sampler;
        while self.next < s.points.len() {
            let i = self.next;
            self.next += 1;
            if i % s.stride != 0 {
                continue;
            }
            let p = s.points[i];
            let far_enough = self
                .last_accepted
                .is_none_or(|prev| prev.distance(p) > s.min_spacing);
            if far_enough {
                self.last_accepted = Some(p);
                return Some(anchor_rect(p, s.diameter));
            }
        }
        None
    }
}

/// Square of side `diameter` centered on `center`.
pub fn anchor_rect(center: Point, diameter: f64) -> Rect {
    Rect::from_center_size(center, (diameter, diameter))
}

/// Every `MoveTo`/`LineTo` endpoint of the flattened path, in path order.
pub fn flattened_points(path: &BezPath) -> Vec<Point> {
    let mut points = Vec::new();
    kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| match el {
        kurbo::PathEl::MoveTo(p) | kurbo::PathEl::LineTo(p) => points.push(p),
        _ => {}
    });
    points
}

#[cfg(test)]
#[path = "../../tests/unit/contour/sampler.rs"]
mod tests;
