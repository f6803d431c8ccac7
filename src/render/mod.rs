pub mod composite;
pub mod cpu;
pub mod text;

use crate::{
    foundation::{
        core::{Canvas, Rgb},
        error::PosterResult,
    },
    scene::{Caption, PosterOp, PosterScene},
    shape::PetalOutline,
};

/// Row-major RGBA8 raster with premultiplied alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Something that can paint a [`PosterScene`] op by op.
///
/// `begin` is always called first, then every op in scene order, then `finish`.
pub trait PosterBackend {
    fn begin(&mut self, canvas: Canvas, background: Rgb) -> PosterResult<()>;
    fn fill(&mut self, outline: &PetalOutline, color: Rgb, alpha: f64) -> PosterResult<()>;
    fn caption(&mut self, caption: &Caption) -> PosterResult<()>;
    fn finish(&mut self) -> PosterResult<FrameRGBA>;
}

pub fn execute_scene(
    backend: &mut dyn PosterBackend,
    scene: &PosterScene,
    canvas: Canvas,
) -> PosterResult<FrameRGBA> {
    backend.begin(canvas, scene.background)?;
    for op in &scene.ops {
        match op {
            PosterOp::Fill {
                outline,
                color,
                alpha,
                ..
            } => backend.fill(outline, *color, *alpha)?,
            PosterOp::Caption(c) => backend.caption(c)?,
        }
    }
    backend.finish()
}

/// Rasterize `scene` on the CPU at `dpi` pixels per logical inch.
#[tracing::instrument(skip(scene), fields(ops = scene.ops.len()))]
pub fn rasterize_scene(scene: &PosterScene, dpi: f64) -> PosterResult<FrameRGBA> {
    let canvas = Canvas::at_dpi(dpi)?;
    let mut backend = cpu::CpuBackend::new();
    let frame = execute_scene(&mut backend, scene, canvas)?;
    tracing::debug!(width = frame.width, height = frame.height, "scene rasterized");
    Ok(frame)
}
