use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, FrameIndex, Rect};
use crate::foundation::error::{LollipopError, LollipopResult};

/// Nut placement and sizing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NutSettings {
    /// Diameter at frame 0.
    pub base_diameter: f64,
    /// The diameter shrinks by one unit per frame and restarts every `period` frames.
    pub period: u64,
    /// Only every `stride`-th flattened contour point is a placement candidate.
    pub stride: usize,
    /// Minimum distance between two accepted anchors.
    pub min_spacing: f64,
}

impl Default for NutSettings {
    fn default() -> Self {
        Self {
            base_diameter: 35.0,
            period: 20,
            stride: 5,
            min_spacing: 12.0,
        }
    }
}

/// Layered stroke parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrokeSettings {
    /// Half the number of stroke layers (and of palette entries).
    pub half_count: usize,
    /// Width increment between neighbouring layers.
    pub double_stroke: f64,
}

impl Default for StrokeSettings {
    fn default() -> Self {
        Self {
            half_count: 15,
            double_stroke: 6.0,
        }
    }
}

impl StrokeSettings {
    pub fn layer_count(&self) -> usize {
        self.half_count * 2
    }
}

/// Full run configuration.
///
/// Every field has a default, so a JSON file only needs to name what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LollipopConfig {
    pub word: String,
    pub frames: u64,
    pub frame_width: u32,
    pub frame_height: u32,
    pub font_size: f64,
    pub font_path: PathBuf,
    /// Family to select among the fonts registered from `font_path`.
    pub font_family: Option<String>,
    pub bold: bool,
    /// Y coordinate of the reflection floor in the output frame.
    pub horizon: f64,
    pub seed: u64,
    pub nut: NutSettings,
    pub stroke: StrokeSettings,
    pub crop_margin: f64,
    pub palette_path: PathBuf,
    pub out_dir: PathBuf,
    pub parallel: bool,
    pub chunk_size: usize,
}

impl Default for LollipopConfig {
    fn default() -> Self {
        Self {
            word: "Lollipop".to_string(),
            frames: 20,
            frame_width: 1920,
            frame_height: 1080,
            font_size: 288.0,
            font_path: PathBuf::from("resources/font.ttf"),
            font_family: None,
            bold: true,
            horizon: 700.0,
            seed: 54,
            nut: NutSettings::default(),
            stroke: StrokeSettings::default(),
            crop_margin: 5.0,
            palette_path: PathBuf::from("resources/palette.png"),
            out_dir: PathBuf::from("out"),
            parallel: false,
            chunk_size: 8,
        }
    }
}

impl LollipopConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LollipopResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LollipopError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LollipopResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LollipopError::resource_missing(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> LollipopResult<()> {
        if self.word.trim().is_empty() {
            return Err(LollipopError::validation("word must be non-empty"));
        }
        if self.frames == 0 {
            return Err(LollipopError::validation("frames must be > 0"));
        }
        Canvas::new(self.frame_width, self.frame_height)?;
        for (name, value) in [
            ("font_size", self.font_size),
            ("nut.base_diameter", self.nut.base_diameter),
            ("stroke.double_stroke", self.stroke.double_stroke),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LollipopError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("horizon", self.horizon),
            ("crop_margin", self.crop_margin),
            ("nut.min_spacing", self.nut.min_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LollipopError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.nut.period == 0 {
            return Err(LollipopError::validation("nut.period must be > 0"));
        }
        if self.nut.stride == 0 {
            return Err(LollipopError::validation("nut.stride must be > 0"));
        }
        if self.stroke.half_count == 0 {
            return Err(LollipopError::validation("stroke.half_count must be > 0"));
        }
        if self.chunk_size == 0 {
            return Err(LollipopError::validation("chunk_size must be > 0"));
        }
        self.word_canvas()?.raster_dims()?;
        Ok(())
    }

    /// Nut diameter for one frame: `base - (index mod period)`, never below 1.
    pub fn nut_diameter(&self, frame: FrameIndex) -> f64 {
        let period = self.nut.period.max(1);
        (self.nut.base_diameter - (frame.0 % period) as f64).max(1.0)
    }

    /// Scratch canvas the word is drawn on before cropping.
    pub fn word_canvas(&self) -> LollipopResult<Canvas> {
        let chars = self.word.chars().count() as f64;
        Canvas::new(
            (chars * self.font_size).ceil() as u32,
            (self.font_size * 3.0).ceil() as u32,
        )
    }

    /// Band of the word canvas the text is centered in (one font size tall, one font size down).
    pub fn text_rect(&self) -> LollipopResult<Rect> {
        let canvas = self.word_canvas()?;
        Ok(Rect::new(
            0.0,
            self.font_size,
            f64::from(canvas.width),
            self.font_size * 2.0,
        ))
    }

    pub fn frame_canvas(&self) -> LollipopResult<Canvas> {
        Canvas::new(self.frame_width, self.frame_height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
