//! Procedural flower posters.
//!
//! A poster is a stack of rose-curve flowers with soft shadows and a faked radial gradient,
//! drawn from a seeded random stream and rasterized on the CPU:
//!
//! - Build and validate a [`RenderConfig`]
//! - [`render`] it into a [`PosterImage`] (draw list + 100 DPI preview)
//! - Export PNG bytes with [`PosterImage::export_png`]
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub mod export;
pub mod palette;
pub mod poster;
pub mod render;
pub mod rng;
pub mod scene;
pub mod shape;

pub use crate::foundation::core::{
    Affine, BezPath, CANVAS_HEIGHT_IN, CANVAS_WIDTH_IN, Canvas, Point, Rgb,
};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::config::RenderConfig;
pub use crate::export::{
    EXPORT_DPI, PREVIEW_DPI, encode_png, suggested_file_name, trim_to_content, write_png,
};
pub use crate::palette::{FRESH_COLORS, PaletteName, hls_to_rgb, palette, rgb_to_hls};
pub use crate::poster::{PosterImage, render};
pub use crate::render::{FrameRGBA, PosterBackend, execute_scene, rasterize_scene};
pub use crate::rng::PosterRng;
pub use crate::scene::{Caption, FillRole, FlowerInstance, PosterOp, PosterScene, plan_poster};
pub use crate::shape::{OUTLINE_POINTS, PetalOutline, rose_outline};
