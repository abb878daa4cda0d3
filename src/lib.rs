//! Lollipop renders a word as candy: stacked colored outlines, small "nuts" studded along the
//! letter contours, a gradient fill, and a fading reflection below a horizon line.
//!
//! The API is session-oriented:
//!
//! - Load and validate a [`LollipopConfig`]
//! - Create a [`RenderSession`], which loads the palette image and font
//! - Render single frames or stream the whole sequence into a [`FrameSink`]
//!
//! Every frame is rendered from scratch with a generator re-seeded from the configured seed,
//! so frames may be rendered in any order or in parallel.
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod contour;
pub mod encode;
mod foundation;
pub mod palette;
/// Word rendering, cropping, reflection and the frame pipeline.
pub mod render;
pub mod text;

pub use crate::foundation::core::{Affine, BezPath, Canvas, FrameIndex, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{LollipopError, LollipopResult};
pub use crate::foundation::math::SeededRng;

pub use crate::assets::decode::{PreparedFont, ReferenceImage};
pub use crate::config::settings::{LollipopConfig, NutSettings, StrokeSettings};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::pipeline::{RenderSession, RenderStats, render_frame, render_frames};
pub use crate::text::outline::{FontOutliner, TextRequest, TextToPath};
