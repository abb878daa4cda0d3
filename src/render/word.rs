use crate::contour::nuts::{GlyphPaths, paint_decoration};
use crate::foundation::core::{Canvas, Rect, Rgba8Premul};
use crate::foundation::error::{LollipopError, LollipopResult};
use crate::render::surface::{Surface, bezpath_to_cpu, clear, render_with, vertical_gradient};

/// One outline pass: a color and the pen width it is drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeLayer {
    pub color: Rgba8Premul,
    pub width: f64,
}

/// Layer `i` of `2 * half_count` uses `palette[i]` at width `(2 * half_count - i) * double_stroke`.
///
/// The result is ordered widest first, which is also the paint order.
pub fn stroke_layers(
    palette: &[Rgba8Premul],
    half_count: usize,
    double_stroke: f64,
) -> LollipopResult<Vec<StrokeLayer>> {
    let count = half_count * 2;
    if count == 0 {
        return Err(LollipopError::validation("stroke half_count must be > 0"));
    }
    if palette.len() < count {
        return Err(LollipopError::validation(format!(
            "palette has {} colors, {count} stroke layers need one each",
            palette.len()
        )));
    }
    Ok((0..count)
        .map(|i| StrokeLayer {
            color: palette[i],
            width: (count - i) as f64 * double_stroke,
        })
        .collect())
}

/// The drawn word plus the widest pen used, which bounds how far any stroke reaches.
#[derive(Debug)]
pub struct WordRender {
    pub surface: Surface,
    pub widest: f64,
}

/// Draw the candy word on a black canvas.
///
/// Paint order: every stroke layer over the decorated outline (widest first, round joins),
/// the white-to-gray gradient fill of the clean outline across `text_rect`, then one
/// painted nut per anchor on top.
pub fn render_word(
    canvas: Canvas,
    text_rect: Rect,
    paths: &GlyphPaths,
    layers: &[StrokeLayer],
    nuts: impl IntoIterator<Item = Rect>,
) -> LollipopResult<WordRender> {
    let widest = layers
        .first()
        .map(|l| l.width)
        .ok_or_else(|| LollipopError::validation("at least one stroke layer is required"))?;

    let decorated = bezpath_to_cpu(paths.decorated());
    let clean = bezpath_to_cpu(paths.clean());

    let surface = render_with(canvas, |ctx| {
        clear(ctx, canvas, Rgba8Premul::BLACK);

        for layer in layers {
            ctx.set_paint(crate::render::surface::color_to_cpu(layer.color));
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(layer.width).with_join(vello_cpu::kurbo::Join::Round),
            );
            ctx.stroke_path(&decorated);
        }

        ctx.set_paint(vertical_gradient(
            text_rect.x0,
            text_rect.y0,
            text_rect.y1,
            Rgba8Premul::WHITE,
            Rgba8Premul::GRAY,
        ));
        ctx.fill_path(&clean);

        let mut painted = 0usize;
        for anchor in nuts {
            paint_decoration(anchor, ctx);
            painted += 1;
        }
        tracing::debug!(layers = layers.len(), nuts = painted, widest, "rendered word");
        Ok(())
    })?;

    Ok(WordRender { surface, widest })
}

#[cfg(test)]
#[path = "../../tests/unit/render/word.rs"]
mod tests;
