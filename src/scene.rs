//! Draw-list planning: turns a config and a seeded stream into ordered fill operations.
//!
//! Planning is the only stage that consumes randomness. Rasterizing the same [`PosterScene`] at
//! any density yields the same poster.

use crate::{
    config::RenderConfig,
    foundation::core::{Point, Rgb},
    palette::palette,
    rng::PosterRng,
    shape::{PetalOutline, rose_outline},
};

pub const SHADOW_ALPHA: f64 = 0.15;
pub const TITLE: &str = "Flower Poster";
pub const SUBTITLE: &str = "Fresh Colors \u{2022} Petal Shapes \u{2022} 3D Effect";

/// One randomly placed flower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowerInstance {
    pub center: Point,
    pub radius: f64,
    pub petal_factor: f64,
    pub color: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRole {
    Shadow { layer: u32 },
    Body { layer: u32, step: u32 },
}

impl FillRole {
    pub fn layer(self) -> u32 {
        match self {
            Self::Shadow { layer } | Self::Body { layer, .. } => layer,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Static caption anchored at its baseline-left point, in normalized poster space.
#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    pub text: &'static str,
    pub anchor: Point,
    pub size_pt: f64,
    pub weight: FontWeight,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PosterOp {
    Fill {
        role: FillRole,
        outline: PetalOutline,
        color: Rgb,
        alpha: f64,
    },
    Caption(Caption),
}

/// Ordered draw list; later ops paint over earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub struct PosterScene {
    pub background: Rgb,
    pub palette: Vec<Rgb>,
    pub flowers: Vec<FlowerInstance>,
    pub ops: Vec<PosterOp>,
}

impl PosterScene {
    pub fn fills(&self) -> impl Iterator<Item = (FillRole, &PetalOutline, Rgb, f64)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            PosterOp::Fill {
                role,
                outline,
                color,
                alpha,
            } => Some((*role, outline, *color, *alpha)),
            PosterOp::Caption(_) => None,
        })
    }

    pub fn captions(&self) -> impl Iterator<Item = &Caption> + '_ {
        self.ops.iter().filter_map(|op| match op {
            PosterOp::Caption(c) => Some(c),
            PosterOp::Fill { .. } => None,
        })
    }
}

/// Plan the whole poster. `config` must already be validated.
#[tracing::instrument(skip(config, rng), fields(seed = config.seed, layers = config.n_layers))]
pub fn plan_poster(config: &RenderConfig, rng: &mut PosterRng) -> PosterScene {
    // Palette draws must be exhausted before the first layer draw.
    let colors = palette(config.palette_name, config.palette_count(), rng);
    tracing::debug!(colors = colors.len(), draws = rng.draws(), "palette resolved");

    let steps = config.gradient_steps as usize;
    let shadow_ops = usize::from(config.with_shadow);
    let mut ops = Vec::with_capacity(config.n_layers as usize * (steps + shadow_ops) + 2);
    let mut flowers = Vec::with_capacity(config.n_layers as usize);

    for layer in 0..config.n_layers {
        let cx = rng.unit();
        let cy = rng.unit();
        let radius = rng.uniform(config.size_min, config.size_max);
        let petal_factor = rng.uniform(config.petal_factor_min, config.petal_factor_max);

        if config.with_shadow {
            let offset = radius * config.shadow_ratio;
            let outline = rose_outline(
                Point::new(cx + offset, cy - offset),
                radius,
                config.petals,
                petal_factor,
            );
            ops.push(PosterOp::Fill {
                role: FillRole::Shadow { layer },
                outline,
                color: Rgb::BLACK,
                alpha: SHADOW_ALPHA,
            });
        }

        let color = colors[rng.index(colors.len())];
        let center = Point::new(cx, cy);
        let base = rose_outline(center, radius, config.petals, petal_factor);

        for step in 0..config.gradient_steps {
            ops.push(PosterOp::Fill {
                role: FillRole::Body { layer, step },
                outline: base.scaled_toward_center(RenderConfig::gradient_scale(step)),
                color,
                alpha: config.gradient_alpha(step),
            });
        }

        tracing::trace!(layer, cx, cy, radius, petal_factor, "flower placed");
        flowers.push(FlowerInstance {
            center,
            radius,
            petal_factor,
            color,
        });
    }

    ops.push(PosterOp::Caption(Caption {
        text: TITLE,
        anchor: Point::new(0.05, 0.95),
        size_pt: 18.0,
        weight: FontWeight::Bold,
        color: Rgb::BLACK,
    }));
    ops.push(PosterOp::Caption(Caption {
        text: SUBTITLE,
        anchor: Point::new(0.05, 0.91),
        size_pt: 11.0,
        weight: FontWeight::Normal,
        color: Rgb::BLACK,
    }));

    PosterScene {
        background: config.bg_color,
        palette: colors,
        flowers,
        ops,
    }
}
