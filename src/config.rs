use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Rgb,
        error::{PosterError, PosterResult},
    },
    palette::PaletteName,
};

/// Largest accepted `gradient_steps`; beyond it the innermost copies would invert.
pub const MAX_GRADIENT_STEPS: u32 = 20;
/// Upper bound on `n_layers`; every layer stores up to `MAX_GRADIENT_STEPS + 1` outlines.
pub const MAX_LAYERS: u32 = 500;
pub const MIN_PETALS: u32 = 3;

/// Everything a poster render depends on.
///
/// Build it at the boundary (CLI flags, JSON file, UI), call [`RenderConfig::validate`], then treat
/// it as read-only. Missing JSON fields take the defaults below.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub n_layers: u32,
    pub petals: u32,
    pub size_min: f64,
    pub size_max: f64,
    pub petal_factor_min: f64,
    pub petal_factor_max: f64,
    pub bg_color: Rgb,
    pub with_shadow: bool,
    pub shadow_ratio: f64,
    pub gradient_steps: u32,
    pub alpha_start: f64,
    pub alpha_step: f64,
    pub palette_name: PaletteName,
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            n_layers: 6,
            petals: 6,
            size_min: 0.15,
            size_max: 0.35,
            petal_factor_min: 0.2,
            petal_factor_max: 0.4,
            bg_color: Rgb::from_unit(250.0 / 255.0, 250.0 / 255.0, 247.0 / 255.0),
            with_shadow: true,
            shadow_ratio: 0.08,
            gradient_steps: 5,
            alpha_start: 0.2,
            alpha_step: 0.15,
            palette_name: PaletteName::Fresh,
            seed: 42,
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(s: &str) -> PosterResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| PosterError::invalid_config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> PosterResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> PosterResult<String> {
        serde_json::to_string_pretty(self)
            .context("serialize config")
            .map_err(PosterError::from)
    }

    pub fn validate(&self) -> PosterResult<()> {
        if self.n_layers < 1 || self.n_layers > MAX_LAYERS {
            return Err(PosterError::invalid_config(format!(
                "n_layers must be within 1..={MAX_LAYERS}, got {}",
                self.n_layers
            )));
        }
        if self.petals < MIN_PETALS {
            return Err(PosterError::invalid_config(format!(
                "petals must be >= {MIN_PETALS}, got {}",
                self.petals
            )));
        }
        if self.gradient_steps < 1 || self.gradient_steps > MAX_GRADIENT_STEPS {
            return Err(PosterError::invalid_config(format!(
                "gradient_steps must be within 1..={MAX_GRADIENT_STEPS}, got {}",
                self.gradient_steps
            )));
        }

        check_range("size", self.size_min, self.size_max)?;
        if self.size_min < 0.0 {
            return Err(PosterError::invalid_config("size_min must be >= 0"));
        }
        check_range(
            "petal_factor",
            self.petal_factor_min,
            self.petal_factor_max,
        )?;

        if !self.shadow_ratio.is_finite() || self.shadow_ratio < 0.0 {
            return Err(PosterError::invalid_config(format!(
                "shadow_ratio must be finite and >= 0, got {}",
                self.shadow_ratio
            )));
        }
        if !self.alpha_start.is_finite() || !(0.0..=1.0).contains(&self.alpha_start) {
            return Err(PosterError::invalid_config(format!(
                "alpha_start must be within [0, 1], got {}",
                self.alpha_start
            )));
        }
        if !self.alpha_step.is_finite() || self.alpha_step < 0.0 {
            return Err(PosterError::invalid_config(format!(
                "alpha_step must be finite and >= 0, got {}",
                self.alpha_step
            )));
        }

        // Catches configs assembled by hand without going through `Rgb::new`.
        Rgb::new(self.bg_color.r, self.bg_color.g, self.bg_color.b)?;
        Ok(())
    }

    /// Alpha of gradient copy `k`, clamped to `[0, 1]` for the fill call.
    pub fn gradient_alpha(&self, k: u32) -> f64 {
        (self.alpha_start + self.alpha_step * f64::from(k)).clamp(0.0, 1.0)
    }

    /// Scale of gradient copy `k` relative to the base outline.
    pub fn gradient_scale(k: u32) -> f64 {
        1.0 - 0.05 * f64::from(k)
    }

    /// Colors requested from the palette provider.
    pub fn palette_count(&self) -> usize {
        (self.n_layers as usize).max(crate::palette::DREAMY_MIN_COLORS)
    }
}

fn check_range(name: &str, min: f64, max: f64) -> PosterResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(PosterError::invalid_config(format!(
            "{name} range must be finite, got [{min}, {max}]"
        )));
    }
    if min > max {
        return Err(PosterError::invalid_config(format!(
            "{name}_min must be <= {name}_max, got [{min}, {max}]"
        )));
    }
    Ok(())
}
