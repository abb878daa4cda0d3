use std::path::{Path, PathBuf};

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LollipopError, LollipopResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed if the run succeeds.
    pub frames: u64,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> LollipopResult<()>;
    /// Push one fully rendered frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LollipopResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> LollipopResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was reached.
    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> LollipopResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LollipopResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> LollipopResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes `0001.png`, `0002.png`, ... into a directory, creating it if absent.
///
/// Each file is encoded under a temporary name and renamed into place, so an interrupted
/// write never leaves a truncated frame behind.
#[derive(Debug, Clone)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name for a frame: 1-based, zero-padded to four digits.
    pub fn file_name(idx: FrameIndex) -> String {
        format!("{:04}.png", idx.sequence_number())
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> LollipopResult<()> {
        ensure_dir(&self.dir)?;
        self.written.clear();
        tracing::debug!(dir = %self.dir.display(), frames = cfg.frames, "png sequence begin");
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> LollipopResult<()> {
        let path = self.dir.join(Self::file_name(idx));
        write_png(&path, frame)?;
        tracing::info!(frame = idx.0, path = %path.display(), "wrote frame");
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> LollipopResult<()> {
        Ok(())
    }
}

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> LollipopResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        LollipopError::io(format!("create output dir '{}': {e}", dir.display()))
    })
}

/// Encode `frame` as a straight-alpha RGBA8 PNG at `path`, atomically.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> LollipopResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".partial");
    let tmp = PathBuf::from(tmp);

    let rgba = frame.to_straight_rgba();
    image::save_buffer_with_format(
        &tmp,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        LollipopError::io(format!("write png '{}': {e}", path.display()))
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        LollipopError::io(format!("move png into place '{}': {e}", path.display()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
