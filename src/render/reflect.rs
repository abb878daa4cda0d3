use crate::foundation::core::{Affine, Canvas, Rect, Rgba8Premul};
use crate::foundation::error::LollipopResult;
use crate::render::surface::{
    Surface, affine_to_cpu, clear, rect_to_cpu, render_with, vertical_gradient,
};

/// Alpha of the fade overlay at the horizon and at the bottom of the reflection.
pub const FADE_ALPHA: (u8, u8) = (150, 255);

/// Compose the final frame: the glyph standing on the horizon, centered horizontally, with a
/// half-height mirrored copy below it fading to black.
///
/// The output is always exactly `frame` sized, whatever the glyph size.
pub fn reflect(glyph: Surface, frame: Canvas, horizon: f64) -> LollipopResult<Surface> {
    let bw = f64::from(glyph.width());
    let bh = f64::from(glyph.height());
    let x = f64::from(frame.width / 2) - bw / 2.0;
    let local = Rect::new(0.0, 0.0, bw, bh);
    let image = glyph.into_image();

    let upright = Affine::translate((x, horizon - bh));
    // Flip around the horizon and squash to half height: local y=bh lands on the horizon.
    let mirrored =
        Affine::translate((x, horizon + bh / 2.0)) * Affine::scale_non_uniform(1.0, -0.5);
    let fade = Rect::new(x, horizon, x + bw, horizon + bh / 2.0);

    render_with(frame, |ctx| {
        clear(ctx, frame, Rgba8Premul::BLACK);

        ctx.set_transform(affine_to_cpu(upright));
        ctx.set_paint(image.clone());
        ctx.fill_rect(&rect_to_cpu(local));

        ctx.set_transform(affine_to_cpu(mirrored));
        ctx.set_paint(image);
        ctx.fill_rect(&rect_to_cpu(local));

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vertical_gradient(
            fade.x0,
            fade.y0,
            fade.y1,
            Rgba8Premul::from_straight_rgba(0, 0, 0, FADE_ALPHA.0),
            Rgba8Premul::from_straight_rgba(0, 0, 0, FADE_ALPHA.1),
        ));
        ctx.fill_rect(&rect_to_cpu(fade));
        tracing::debug!(x, horizon, bw, bh, "composed reflection");
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/reflect.rs"]
mod tests;
