use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, Canvas, Rect, Rgba8Premul};
use crate::foundation::error::{LollipopError, LollipopResult};
use crate::foundation::math::unpremul_u8;
use crate::render::frame::FrameRGBA;

/// An owned premultiplied RGBA8 raster.
///
/// Stages hand surfaces to each other by value; nothing keeps a second handle to a surface
/// once it has been passed on.
pub struct Surface {
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Surface {
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Build a surface from tightly packed premultiplied RGBA8 bytes.
    pub fn from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> LollipopResult<Self> {
        let (w, h) = Canvas::new(width, height)?.raster_dims()?;
        if bytes.len()
            != (width as usize)
                .saturating_mul(height as usize)
                .saturating_mul(4)
        {
            return Err(LollipopError::degenerate("surface byte len mismatch"));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| {
                vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
            })
            .collect::<Vec<_>>();
        Ok(Self {
            pixmap: vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true),
        })
    }

    pub fn premul_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied pixel at `(x, y)`; out-of-range reads are transparent.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        if x >= self.width() || y >= self.height() {
            return Rgba8Premul::transparent();
        }
        let idx = ((y as usize) * (self.width() as usize) + (x as usize)) * 4;
        let px = &self.premul_bytes()[idx..idx + 4];
        Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }

    /// Turn the surface into an image paint sampled with bicubic filtering.
    pub(crate) fn into_image(self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(self.pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality: vello_cpu::peniko::ImageQuality::High,
                ..vello_cpu::peniko::ImageSampler::default()
            },
        }
    }

    pub fn into_frame(self) -> FrameRGBA {
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.premul_bytes().to_vec(),
            premultiplied: true,
        }
    }
}

/// Record drawing commands against a fresh context of `canvas` size and rasterize them.
pub(crate) fn render_with(
    canvas: Canvas,
    draw: impl FnOnce(&mut vello_cpu::RenderContext) -> LollipopResult<()>,
) -> LollipopResult<Surface> {
    let (w, h) = canvas.raster_dims()?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    draw(&mut ctx)?;
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(Surface { pixmap })
}

/// Paint the whole context with one opaque color.
pub(crate) fn clear(ctx: &mut vello_cpu::RenderContext, canvas: Canvas, color: Rgba8Premul) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color_to_cpu(color));
    ctx.fill_rect(&rect_to_cpu(canvas.rect()));
}

/// Two-stop vertical gradient spanning `y0..y1` at column `x`, padded beyond both ends.
pub(crate) fn vertical_gradient(
    x: f64,
    y0: f64,
    y1: f64,
    top: Rgba8Premul,
    bottom: Rgba8Premul,
) -> vello_cpu::peniko::Gradient {
    use vello_cpu::peniko;

    let stops = [
        peniko::ColorStop::from((0.0, color_to_cpu(top))),
        peniko::ColorStop::from((1.0, color_to_cpu(bottom))),
    ];
    peniko::Gradient {
        kind: peniko::GradientKind::Linear(peniko::LinearGradientPosition::new((x, y0), (x, y1))),
        extend: peniko::Extend::Pad,
        stops: peniko::ColorStops::from(&stops[..]),
        ..peniko::Gradient::default()
    }
}

pub(crate) fn color_to_cpu(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(
        unpremul_u8(c.r, c.a),
        unpremul_u8(c.g, c.a),
        unpremul_u8(c.b, c.a),
        c.a,
    )
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
