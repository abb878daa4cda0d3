use crate::foundation::error::{LollipopError, LollipopResult};

pub use kurbo::{Affine, BezPath, Point, Rect};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// 1-based sequence number used for output file names.
    pub fn sequence_number(self) -> u64 {
        self.0.saturating_add(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> LollipopResult<Self> {
        if width == 0 || height == 0 {
            return Err(LollipopError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Dimensions as the `u16` pair the rasterizer works with.
    pub fn raster_dims(self) -> LollipopResult<(u16, u16)> {
        let w: u16 = self.width.try_into().map_err(|_| {
            LollipopError::degenerate(format!("canvas width {} exceeds u16", self.width))
        })?;
        let h: u16 = self.height.try_into().map_err(|_| {
            LollipopError::degenerate(format!("canvas height {} exceeds u16", self.height))
        })?;
        Ok((w, h))
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    pub const GRAY: Self = Self::opaque(128, 128, 128);
    pub const LIGHT_GRAY: Self = Self::opaque(211, 211, 211);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channel-wise `255 - c` of an opaque color.
    pub fn complement(self) -> Self {
        Self::opaque(255 - self.r, 255 - self.g, 255 - self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
