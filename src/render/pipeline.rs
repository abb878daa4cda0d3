use rayon::prelude::*;

use crate::assets::decode::{PreparedFont, ReferenceImage, load_font, load_reference_image};
use crate::config::settings::LollipopConfig;
use crate::contour::nuts::GlyphPaths;
use crate::contour::sampler::NutSampler;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{LollipopError, LollipopResult};
use crate::foundation::math::SeededRng;
use crate::palette::generate::generate_colors;
use crate::render::crop::{crop, crop_bounds};
use crate::render::frame::FrameRGBA;
use crate::render::reflect::reflect;
use crate::render::word::{render_word, stroke_layers};
use crate::text::outline::{FontOutliner, TextRequest, TextToPath};

/// Counters reported by range renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
    /// Fingerprint of each pushed frame, in order.
    pub fingerprints: Vec<u64>,
}

/// Render one frame from scratch.
///
/// Nothing carries over between calls: the generator is re-seeded from `config.seed`, so the
/// palette is identical for every frame and only the nut diameter varies with `frame`.
#[tracing::instrument(skip(config, outliner, reference), fields(word = %config.word))]
pub fn render_frame<T: TextToPath + ?Sized>(
    config: &LollipopConfig,
    outliner: &mut T,
    reference: &ReferenceImage,
    frame: FrameIndex,
) -> LollipopResult<FrameRGBA> {
    let word_canvas = config.word_canvas()?;
    let text_rect = config.text_rect()?;
    let diameter = config.nut_diameter(frame);

    let clean = outliner.text_path(
        &config.word,
        &TextRequest {
            font_size: config.font_size as f32,
            bold: config.bold,
            rect: text_rect,
        },
    )?;
    if clean.elements().is_empty() {
        return Err(LollipopError::degenerate(format!(
            "word '{}' produced an empty outline",
            config.word
        )));
    }

    let sampler = NutSampler::new(&clean, config.nut.stride, config.nut.min_spacing, diameter);
    let paths = GlyphPaths::build(clean, sampler.anchors());

    let mut rng = SeededRng::new(config.seed);
    let palette = generate_colors(config.stroke.layer_count(), &mut rng, reference)?;
    let layers = stroke_layers(&palette, config.stroke.half_count, config.stroke.double_stroke)?;

    let word = render_word(word_canvas, text_rect, &paths, &layers, sampler.anchors())?;
    let bounds = crop_bounds(paths.decorated(), word.widest, config.crop_margin, word_canvas)?;
    tracing::debug!(?bounds, diameter, "cropping word");
    let glyph = crop(word.surface, bounds)?;

    let out = reflect(glyph, config.frame_canvas()?, config.horizon)?;
    Ok(out.into_frame())
}

/// Render frames `0..config.frames` into `sink`, in order.
///
/// `make_outliner` is called once for sequential runs and once per rayon worker for
/// parallel runs. Parallel runs render `chunk_size` frames at a time and push each chunk in
/// order. The first failing frame aborts the run; later frames are never pushed.
#[tracing::instrument(skip_all, fields(frames = config.frames, parallel = config.parallel))]
pub fn render_frames<T, F>(
    config: &LollipopConfig,
    reference: &ReferenceImage,
    make_outliner: F,
    sink: &mut dyn FrameSink,
) -> LollipopResult<RenderStats>
where
    T: TextToPath,
    F: Fn() -> LollipopResult<T> + Sync + Send,
{
    config.validate()?;
    let frame_canvas = config.frame_canvas()?;
    // Fails fast with the real error kind before any worker starts.
    let mut outliner = make_outliner()?;

    sink.begin(SinkConfig {
        width: frame_canvas.width,
        height: frame_canvas.height,
        frames: config.frames,
    })?;

    let mut stats = RenderStats::default();
    if config.parallel {
        drop(outliner);
        let chunk = config.chunk_size.max(1) as u64;
        let mut start = 0u64;
        while start < config.frames {
            let end = (start + chunk).min(config.frames);
            let rendered = (start..end)
                .into_par_iter()
                .map_init(&make_outliner, |worker, i| match worker {
                    Ok(outliner) => render_frame(config, outliner, reference, FrameIndex(i)),
                    Err(e) => Err(LollipopError::Other(anyhow::anyhow!(
                        "text outliner unavailable on worker: {e}"
                    ))),
                })
                .collect::<LollipopResult<Vec<_>>>()?;
            for (offset, frame) in rendered.iter().enumerate() {
                push(sink, &mut stats, FrameIndex(start + offset as u64), frame)?;
            }
            start = end;
        }
    } else {
        for i in 0..config.frames {
            let frame = render_frame(config, &mut outliner, reference, FrameIndex(i))?;
            push(sink, &mut stats, FrameIndex(i), &frame)?;
        }
    }

    sink.end()?;
    Ok(stats)
}

fn push(
    sink: &mut dyn FrameSink,
    stats: &mut RenderStats,
    idx: FrameIndex,
    frame: &FrameRGBA,
) -> LollipopResult<()> {
    sink.push_frame(idx, frame)?;
    stats.frames_rendered += 1;
    stats.fingerprints.push(frame.fingerprint());
    Ok(())
}

/// A validated configuration with its external resources loaded.
#[derive(Debug)]
pub struct RenderSession {
    config: LollipopConfig,
    reference: ReferenceImage,
    font: PreparedFont,
}

impl RenderSession {
    /// Validate `config`, load the palette image and font, and check the font family resolves.
    pub fn new(config: LollipopConfig) -> LollipopResult<Self> {
        config.validate()?;
        let reference = load_reference_image(&config.palette_path)?;
        let font = load_font(&config.font_path)?;
        FontOutliner::new(font.clone(), config.font_family.as_deref())?;
        Ok(Self {
            config,
            reference,
            font,
        })
    }

    pub fn config(&self) -> &LollipopConfig {
        &self.config
    }

    pub fn outliner(&self) -> LollipopResult<FontOutliner> {
        FontOutliner::new(self.font.clone(), self.config.font_family.as_deref())
    }

    pub fn render_frame(&self, frame: FrameIndex) -> LollipopResult<FrameRGBA> {
        let mut outliner = self.outliner()?;
        render_frame(&self.config, &mut outliner, &self.reference, frame)
    }

    pub fn render_all(&self, sink: &mut dyn FrameSink) -> LollipopResult<RenderStats> {
        render_frames(&self.config, &self.reference, || self.outliner(), sink)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
