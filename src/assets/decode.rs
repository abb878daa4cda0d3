use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{LollipopError, LollipopResult};

/// First row of the palette reference image, as opaque colors.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceImage {
    row: Vec<Rgba8Premul>,
}

impl ReferenceImage {
    /// Wrap an already-decoded row. Widths below 2 leave the sampling stride undefined.
    pub fn from_row(row: Vec<Rgba8Premul>) -> LollipopResult<Self> {
        if row.len() <= 1 {
            return Err(LollipopError::degenerate(format!(
                "reference image width must be >= 2 (got {})",
                row.len()
            )));
        }
        Ok(Self { row })
    }

    pub fn width(&self) -> usize {
        self.row.len()
    }

    pub fn pixel(&self, index: usize) -> Rgba8Premul {
        self.row[index % self.row.len()]
    }
}

/// Raw font file bytes, shared between layout workers.
#[derive(Clone)]
pub struct PreparedFont {
    pub bytes: Arc<Vec<u8>>,
    pub source: PathBuf,
}

impl std::fmt::Debug for PreparedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedFont")
            .field("source", &self.source)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Decode encoded image bytes and keep row 0 as opaque colors.
///
/// Alpha is dropped: palette entries are always opaque.
pub fn decode_reference_image(bytes: &[u8]) -> LollipopResult<ReferenceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode palette image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let row = (0..rgba.width())
        .map(|x| {
            let px = rgba.get_pixel(x, 0).0;
            Rgba8Premul::opaque(px[0], px[1], px[2])
        })
        .collect();
    ReferenceImage::from_row(row)
}

#[tracing::instrument]
pub fn load_reference_image(path: &Path) -> LollipopResult<ReferenceImage> {
    let bytes = read_resource(path, "palette image")?;
    let img = decode_reference_image(&bytes)?;
    tracing::debug!(width = img.width(), "loaded palette reference image");
    Ok(img)
}

/// Read a font file and check that it parses as a face.
#[tracing::instrument]
pub fn load_font(path: &Path) -> LollipopResult<PreparedFont> {
    let bytes = read_resource(path, "font file")?;
    ttf_parser::Face::parse(&bytes, 0).map_err(|e| {
        LollipopError::resource_missing(format!(
            "font file '{}' has no usable face: {e}",
            path.display()
        ))
    })?;
    Ok(PreparedFont {
        bytes: Arc::new(bytes),
        source: path.to_path_buf(),
    })
}

fn read_resource(path: &Path, what: &str) -> LollipopResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        LollipopError::resource_missing(format!("{what} '{}': {e}", path.display()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
