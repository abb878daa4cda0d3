use std::borrow::Cow;

use crate::assets::decode::PreparedFont;
use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::error::{LollipopError, LollipopResult};

/// How a piece of text should be placed before its outline is taken.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRequest {
    /// Em size in canvas pixels.
    pub font_size: f32,
    pub bold: bool,
    /// The laid-out line is centered horizontally and vertically in this rectangle.
    pub rect: Rect,
}

/// Source of glyph outlines for a string.
///
/// The returned path is made of closed contours in canvas coordinates (y down).
pub trait TextToPath {
    fn text_path(&mut self, text: &str, request: &TextRequest) -> LollipopResult<BezPath>;
}

/// [`TextToPath`] backed by a single font file: Parley shapes and positions, ttf-parser
/// supplies the glyph contours.
pub struct FontOutliner {
    font: PreparedFont,
    family_name: String,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

impl std::fmt::Debug for FontOutliner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontOutliner")
            .field("font", &self.font)
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl FontOutliner {
    /// Register `font` and resolve `family` among the families it declares.
    ///
    /// With no family requested, the first registered family is used.
    pub fn new(font: PreparedFont, family: Option<&str>) -> LollipopResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.to_vec()), None);

        let names: Vec<String> = families
            .iter()
            .filter_map(|(id, _)| font_ctx.collection.family_name(*id).map(str::to_string))
            .collect();

        let family_name = match family {
            Some(wanted) => names
                .iter()
                .find(|n| n.eq_ignore_ascii_case(wanted))
                .cloned()
                .ok_or_else(|| {
                    LollipopError::resource_missing(format!(
                        "font family '{wanted}' not found in '{}' (available: {})",
                        font.source.display(),
                        names.join(", ")
                    ))
                })?,
            None => names.first().cloned().ok_or_else(|| {
                LollipopError::resource_missing(format!(
                    "no font families registered from '{}'",
                    font.source.display()
                ))
            })?,
        };

        Ok(Self {
            font,
            family_name,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout(&mut self, text: &str, request: &TextRequest) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(request.font_size));
        if request.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextToPath for FontOutliner {
    #[tracing::instrument(skip(self))]
    fn text_path(&mut self, text: &str, request: &TextRequest) -> LollipopResult<BezPath> {
        if !request.font_size.is_finite() || request.font_size <= 0.0 {
            return Err(LollipopError::validation(
                "text font_size must be finite and > 0",
            ));
        }

        let layout = self.layout(text, request);
        let origin = Point::new(
            request.rect.x0 + (request.rect.width() - f64::from(layout.width())) / 2.0,
            request.rect.y0 + (request.rect.height() - f64::from(layout.height())) / 2.0,
        );

        let mut path = BezPath::new();
        let mut warned_bold = false;
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let face_index = run.run().font().index;
                let face = ttf_parser::Face::parse(&self.font.bytes, face_index).map_err(|e| {
                    LollipopError::resource_missing(format!(
                        "font face {face_index} of '{}': {e}",
                        self.font.source.display()
                    ))
                })?;
                if !warned_bold && lacks_bold(&face, request.bold) {
                    tracing::warn!(
                        font = %self.font.source.display(),
                        "bold requested but the face is not bold; drawing regular outlines"
                    );
                    warned_bold = true;
                }
                let scale =
                    f64::from(run.run().font_size()) / f64::from(face.units_per_em().max(1));

                // Positions include the run offset, per-glyph advances and the line baseline.
                for g in run.positioned_glyphs() {
                    let Ok(id) = u16::try_from(g.id) else {
                        continue;
                    };
                    let mut pen = GlyphPen {
                        path: &mut path,
                        origin: Point::new(origin.x + f64::from(g.x), origin.y + f64::from(g.y)),
                        scale,
                    };
                    // Glyphs without contours (spaces) report `None`.
                    let _ = face.outline_glyph(ttf_parser::GlyphId(id), &mut pen);
                }
            }
        }

        if path.elements().is_empty() {
            return Err(LollipopError::degenerate(format!(
                "text '{text}' produced no glyph outline"
            )));
        }
        tracing::debug!(elements = path.elements().len(), "extracted glyph outline");
        Ok(path)
    }
}

/// Bold was asked for but `face` has no bold design, so outlines stay regular weight.
fn lacks_bold(face: &ttf_parser::Face<'_>, bold: bool) -> bool {
    bold && !face.is_bold() && face.weight().to_number() < 600
}

/// Maps font units (y up) into canvas pixels (y down) around a glyph origin.
struct GlyphPen<'a> {
    path: &'a mut BezPath,
    origin: Point,
    scale: f64,
}

impl GlyphPen<'_> {
    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.origin.x + f64::from(x) * self.scale,
            self.origin.y - f64::from(y) * self.scale,
        )
    }
}

impl ttf_parser::OutlineBuilder for GlyphPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p1 = self.map(x1, y1);
        let p = self.map(x, y);
        self.path.quad_to(p1, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p1 = self.map(x1, y1);
        let p2 = self.map(x2, y2);
        let p = self.map(x, y);
        self.path.curve_to(p1, p2, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/outline.rs"]
mod tests;
