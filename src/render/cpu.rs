use crate::{
    foundation::{
        core::{Canvas, Rgb},
        error::{PosterError, PosterResult},
    },
    render::{FrameRGBA, PosterBackend, composite, text},
    scene::Caption,
    shape::PetalOutline,
};

/// `vello_cpu` rasterizer for poster scenes.
#[derive(Default)]
pub struct CpuBackend {
    target: Option<CpuTarget>,
}

struct CpuTarget {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    captions: Vec<Caption>,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn target_mut(&mut self) -> PosterResult<&mut CpuTarget> {
        self.target
            .as_mut()
            .ok_or_else(|| PosterError::raster("cpu backend used before begin()"))
    }
}

impl PosterBackend for CpuBackend {
    fn begin(&mut self, canvas: Canvas, background: Rgb) -> PosterResult<()> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| PosterError::raster("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| PosterError::raster("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        let [r, g, b, a] = background.to_rgba8();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        self.target = Some(CpuTarget {
            canvas,
            width,
            height,
            ctx,
            captions: Vec::new(),
        });
        Ok(())
    }

    fn fill(&mut self, outline: &PetalOutline, color: Rgb, alpha: f64) -> PosterResult<()> {
        let target = self.target_mut()?;
        let opacity = alpha.clamp(0.0, 1.0) as f32;
        let [r, g, b, a] = color.to_rgba8();

        let ctx = &mut target.ctx;
        ctx.set_transform(target.canvas.data_to_pixels());
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        ctx.fill_path(&outline.to_bez_path());
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn caption(&mut self, caption: &Caption) -> PosterResult<()> {
        self.target_mut()?.captions.push(caption.clone());
        Ok(())
    }

    fn finish(&mut self) -> PosterResult<FrameRGBA> {
        let CpuTarget {
            canvas,
            width,
            height,
            mut ctx,
            captions,
        } = self
            .target
            .take()
            .ok_or_else(|| PosterError::raster("cpu backend finished before begin()"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        let mut data = pixmap.data_as_u8_slice().to_vec();

        if !captions.is_empty() {
            let layer = text::rasterize_captions(&captions, canvas)?;
            composite::over_in_place(&mut data, &layer, 1.0)?;
        }

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{foundation::core::Point, shape::rose_outline};

    fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
        frame.pixel(x, y).unwrap()
    }

    #[test]
    fn background_fills_the_canvas() {
        let mut backend = CpuBackend::new();
        let canvas = Canvas::at_dpi(10.0).unwrap();
        backend
            .begin(canvas, Rgb::new(1.0, 0.0, 0.0).unwrap())
            .unwrap();
        let frame = backend.finish().unwrap();
        assert_eq!((frame.width, frame.height), (60, 80));
        assert_eq!(pixel(&frame, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, 59, 79), [255, 0, 0, 255]);
    }

    #[test]
    fn opaque_fill_covers_its_center_only() {
        let mut backend = CpuBackend::new();
        let canvas = Canvas::at_dpi(20.0).unwrap();
        backend.begin(canvas, Rgb::BLACK).unwrap();
        let outline = rose_outline(Point::new(0.5, 0.25), 0.1, 6, 0.2);
        backend
            .fill(&outline, Rgb::new(1.0, 1.0, 1.0).unwrap(), 1.0)
            .unwrap();
        let frame = backend.finish().unwrap();

        // (0.5, 0.25) in data space is (60, 120) in pixels.
        assert_eq!(pixel(&frame, 60, 120), [255, 255, 255, 255]);
        assert_eq!(pixel(&frame, 60, 40), [0, 0, 0, 255]);
    }

    #[test]
    fn translucent_fill_blends_with_background() {
        let mut backend = CpuBackend::new();
        let canvas = Canvas::at_dpi(20.0).unwrap();
        backend.begin(canvas, Rgb::BLACK).unwrap();
        let outline = rose_outline(Point::new(0.5, 0.5), 0.2, 6, 0.2);
        backend
            .fill(&outline, Rgb::new(1.0, 1.0, 1.0).unwrap(), 0.5)
            .unwrap();
        let frame = backend.finish().unwrap();
        let [r, _, _, a] = pixel(&frame, 60, 80);
        assert_eq!(a, 255);
        assert!((120..=136).contains(&r), "r = {r}");
    }

    #[test]
    fn fill_before_begin_is_an_error() {
        let mut backend = CpuBackend::new();
        let outline = rose_outline(Point::new(0.5, 0.5), 0.2, 6, 0.2);
        assert!(backend.fill(&outline, Rgb::BLACK, 1.0).is_err());
        assert!(backend.finish().is_err());
    }
}
