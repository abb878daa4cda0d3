use kurbo::Shape;

use crate::foundation::core::{BezPath, Rect, Rgba8Premul};
use crate::render::surface::{bezpath_to_cpu, color_to_cpu};

/// Tolerance used when nut ellipses are converted to path elements.
const NUT_TOLERANCE: f64 = 0.1;

/// Border pen width of a painted nut.
pub const NUT_BORDER_WIDTH: f64 = 1.0;

/// The two outline variants drawn for one frame.
///
/// `clean` is the glyph outline exactly as extracted; `decorated` is the same outline with a
/// nut circle appended per anchor. Neither changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphPaths {
    clean: BezPath,
    decorated: BezPath,
}

impl GlyphPaths {
    pub fn build(clean: BezPath, anchors: impl IntoIterator<Item = Rect>) -> Self {
        let mut decorated = clean.clone();
        let mut added = 0usize;
        for anchor in anchors {
            add_decoration(anchor, &mut decorated);
            added += 1;
        }
        tracing::debug!(nuts = added, "built decorated outline");
        Self { clean, decorated }
    }

    /// Glyph outline only; filled with the gradient.
    pub fn clean(&self) -> &BezPath {
        &self.clean
    }

    /// Glyph outline plus nut circles; stroked and used for crop bounds.
    pub fn decorated(&self) -> &BezPath {
        &self.decorated
    }
}

/// Append the ellipse inscribed in `anchor` as a closed sub-path.
pub fn add_decoration(anchor: Rect, target: &mut BezPath) {
    target.extend(nut_ellipse(anchor).path_elements(NUT_TOLERANCE));
}

/// Fill the ellipse inscribed in `anchor` white and outline it light gray.
pub fn paint_decoration(anchor: Rect, ctx: &mut vello_cpu::RenderContext) {
    let path = bezpath_to_cpu(&nut_ellipse(anchor).to_path(NUT_TOLERANCE));
    ctx.set_paint(color_to_cpu(Rgba8Premul::WHITE));
    ctx.fill_path(&path);
    ctx.set_paint(color_to_cpu(Rgba8Premul::LIGHT_GRAY));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(NUT_BORDER_WIDTH));
    ctx.stroke_path(&path);
}

fn nut_ellipse(anchor: Rect) -> kurbo::Ellipse {
    kurbo::Ellipse::from_rect(anchor)
}

#[cfg(test)]
#[path = "../../tests/unit/contour/nuts.rs"]
mod tests;
