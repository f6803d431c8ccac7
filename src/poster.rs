use crate::{
    config::RenderConfig,
    export::{self, EXPORT_DPI, PREVIEW_DPI},
    foundation::error::PosterResult,
    render::{FrameRGBA, rasterize_scene},
    rng::PosterRng,
    scene::{PosterScene, plan_poster},
};

/// Output of one [`render`] call.
///
/// Holds the planned draw list so the poster can be rasterized again at any density without
/// drawing new random numbers.
#[derive(Clone, Debug)]
pub struct PosterImage {
    config: RenderConfig,
    scene: PosterScene,
    preview: FrameRGBA,
}

impl PosterImage {
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn scene(&self) -> &PosterScene {
        &self.scene
    }

    /// The 100 DPI raster.
    pub fn preview(&self) -> &FrameRGBA {
        &self.preview
    }

    pub fn rasterize(&self, dpi: f64) -> PosterResult<FrameRGBA> {
        if dpi == PREVIEW_DPI {
            return Ok(self.preview.clone());
        }
        rasterize_scene(&self.scene, dpi)
    }

    /// PNG bytes at `dpi`, trimmed to content.
    #[tracing::instrument(skip(self), fields(seed = self.config.seed))]
    pub fn export_png(&self, dpi: f64) -> PosterResult<Vec<u8>> {
        let frame = self.rasterize(dpi)?;
        let trimmed = export::trim_to_content(&frame);
        let png = export::encode_png(&trimmed)?;
        tracing::debug!(
            width = trimmed.width,
            height = trimmed.height,
            bytes = png.len(),
            "poster exported"
        );
        Ok(png)
    }

    /// PNG bytes at the default 300 DPI export density.
    pub fn to_png(&self) -> PosterResult<Vec<u8>> {
        self.export_png(EXPORT_DPI)
    }

    pub fn suggested_file_name(&self) -> String {
        export::suggested_file_name(self.config.seed)
    }
}

/// Render a poster. Deterministic in `config`: each call seeds its own stream from
/// `config.seed`, so concurrent calls never share random state.
#[tracing::instrument(skip(config), fields(seed = config.seed, palette = %config.palette_name))]
pub fn render(config: &RenderConfig) -> PosterResult<PosterImage> {
    config.validate()?;

    let mut rng = PosterRng::new(config.seed);
    let scene = plan_poster(config, &mut rng);
    tracing::debug!(draws = rng.draws(), ops = scene.ops.len(), "poster planned");

    let preview = rasterize_scene(&scene, PREVIEW_DPI)?;
    Ok(PosterImage {
        config: config.clone(),
        scene,
        preview,
    })
}
