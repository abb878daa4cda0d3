use crate::assets::decode::ReferenceImage;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{LollipopError, LollipopResult};
use crate::foundation::math::{SeededRng, mix_channel};

/// Weight of the reference sample, cycled by palette index.
pub const BLEND_RATIOS: [f64; 4] = [0.7, 0.4, 0.2, 0.1];

/// Build the stroke palette: random base colors and their complements, each pulled toward a
/// sample of the reference image.
///
/// Draw order on `rng` is fixed: all base channels first, then the reference start offset.
pub fn generate_colors(
    count: usize,
    rng: &mut SeededRng,
    reference: &ReferenceImage,
) -> LollipopResult<Vec<Rgba8Premul>> {
    let base = base_colors(count, rng)?;
    let samples = sample_reference(count, rng, reference)?;

    let out: Vec<Rgba8Premul> = samples
        .iter()
        .zip(&base)
        .enumerate()
        .map(|(i, (s, b))| blend(*s, *b, BLEND_RATIOS[i % BLEND_RATIOS.len()]))
        .collect();
    tracing::debug!(count = out.len(), "generated palette");
    Ok(out)
}

/// First half random, second half the channel-wise complements of the first.
pub fn base_colors(count: usize, rng: &mut SeededRng) -> LollipopResult<Vec<Rgba8Premul>> {
    let half = count / 2;
    if half == 0 {
        return Err(LollipopError::validation("palette count must be >= 2"));
    }

    let mut colors = Vec::with_capacity(count);
    for _ in 0..half {
        let r = rng.next_below(255) as u8;
        let g = rng.next_below(255) as u8;
        let b = rng.next_below(255) as u8;
        colors.push(Rgba8Premul::opaque(r, g, b));
    }
    for i in half..count {
        let o = colors[i % half];
        colors.push(o.complement());
    }
    Ok(colors)
}

/// Walk row 0 of the reference with a fixed stride from a random start.
///
/// The index wraps modulo `width - 1`, so the last column is never read. The stride is at
/// least 1 even when the image is narrower than `count`.
pub fn sample_reference(
    count: usize,
    rng: &mut SeededRng,
    reference: &ReferenceImage,
) -> LollipopResult<Vec<Rgba8Premul>> {
    let w = reference.width();
    if w <= 1 {
        return Err(LollipopError::degenerate(
            "reference image width must be >= 2",
        ));
    }
    let start_bound = u32::try_from(w)
        .map_err(|_| LollipopError::degenerate("reference image width exceeds u32"))?;

    let step = (w / count.max(1)).max(1);
    let wrap = w - 1;
    let mut index = rng.next_below(start_bound) as usize;

    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        index = (index + step) % wrap;
        out.push(reference.pixel(index));
    }
    Ok(out)
}

/// `reference*ratio + base*(1-ratio)` per channel; the result is opaque.
pub fn blend(reference: Rgba8Premul, base: Rgba8Premul, ratio: f64) -> Rgba8Premul {
    Rgba8Premul::opaque(
        mix_channel(reference.r, base.r, ratio),
        mix_channel(reference.g, base.g, ratio),
        mix_channel(reference.b, base.b, ratio),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/palette/generate.rs"]
mod tests;
