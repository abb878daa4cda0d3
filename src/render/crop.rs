use kurbo::Shape;

use crate::foundation::core::{BezPath, Canvas, Rect};
use crate::foundation::error::{LollipopError, LollipopResult};
use crate::render::surface::Surface;

const WIDEN_TOLERANCE: f64 = 0.25;

/// Pixel-aligned sub-rectangle of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x + self.width),
            f64::from(self.y + self.height),
        )
    }
}

/// Bounding box of `path` stroked with a round-joined pen of `width`.
pub fn widened_bounds(path: &BezPath, width: f64) -> Rect {
    let style = kurbo::Stroke::new(width).with_join(kurbo::Join::Round);
    let widened = kurbo::stroke(
        path.iter(),
        &style,
        &kurbo::StrokeOpts::default(),
        WIDEN_TOLERANCE,
    );
    widened.bounding_box()
}

/// Widened bounds grown by `margin`, rounded outward to whole pixels and clamped to `canvas`.
pub fn crop_bounds(
    decorated: &BezPath,
    widest: f64,
    margin: f64,
    canvas: Canvas,
) -> LollipopResult<CropRect> {
    if decorated.elements().is_empty() {
        return Err(LollipopError::degenerate("cannot crop to an empty outline"));
    }
    let bounds = widened_bounds(decorated, widest);
    let grown = bounds.inflate(margin, margin);
    let x0 = grown.x0.floor().max(0.0);
    let y0 = grown.y0.floor().max(0.0);
    let x1 = grown.x1.ceil().min(f64::from(canvas.width));
    let y1 = grown.y1.ceil().min(f64::from(canvas.height));

    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite())
        || x1 <= x0
        || y1 <= y0
    {
        return Err(LollipopError::degenerate(format!(
            "crop rectangle {grown:?} does not overlap the {}x{} canvas",
            canvas.width, canvas.height
        )));
    }

    let rect = CropRect {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    };
    if grown.x0 < 0.0
        || grown.y0 < 0.0
        || grown.x1 > f64::from(canvas.width)
        || grown.y1 > f64::from(canvas.height)
    {
        tracing::debug!(?grown, ?rect, "crop rectangle clamped to canvas");
    }
    Ok(rect)
}

/// Copy `rect` out of `surface` into a new surface. The source is consumed.
pub fn crop(surface: Surface, rect: CropRect) -> LollipopResult<Surface> {
    let src_w = surface.width() as usize;
    let src_h = surface.height() as usize;
    let (x, y) = (rect.x as usize, rect.y as usize);
    let (w, h) = (rect.width as usize, rect.height as usize);
    if w == 0 || h == 0 || x + w > src_w || y + h > src_h {
        return Err(LollipopError::degenerate(format!(
            "crop {rect:?} outside {src_w}x{src_h} surface"
        )));
    }

    let src = surface.premul_bytes();
    let mut out = Vec::with_capacity(w * h * 4);
    for row in y..y + h {
        let start = (row * src_w + x) * 4;
        out.extend_from_slice(&src[start..start + w * 4]);
    }
    Surface::from_premul_bytes(&out, rect.width, rect.height)
}

#[cfg(test)]
#[path = "../../tests/unit/render/crop.rs"]
mod tests;
