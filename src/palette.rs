use std::{fmt, str::FromStr};

use crate::{
    foundation::{
        core::Rgb,
        error::{PosterError, PosterResult},
    },
    rng::PosterRng,
};

/// Minimum number of colors a dreamy palette holds.
pub const DREAMY_MIN_COLORS: usize = 8;
pub const DREAMY_HUE_RANGE: (f64, f64) = (0.70, 0.85);
pub const DREAMY_SATURATION_RANGE: (f64, f64) = (0.25, 0.45);
pub const DREAMY_LIGHTNESS_RANGE: (f64, f64) = (0.72, 0.86);

/// Pink, green, blue, purple, cream.
pub const FRESH_COLORS: [Rgb; 5] = [
    Rgb::from_unit(0.95, 0.75, 0.80),
    Rgb::from_unit(0.70, 0.85, 0.70),
    Rgb::from_unit(0.70, 0.80, 0.95),
    Rgb::from_unit(0.85, 0.75, 0.95),
    Rgb::from_unit(0.98, 0.93, 0.75),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteName {
    #[default]
    Fresh,
    #[serde(alias = "purple")]
    Dreamy,
}

impl PaletteName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Dreamy => "dreamy",
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteName {
    type Err = PosterError;

    fn from_str(s: &str) -> PosterResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fresh" => Ok(Self::Fresh),
            "dreamy" | "purple" => Ok(Self::Dreamy),
            other => Err(PosterError::invalid_config(format!(
                "unknown palette \"{other}\" (expected fresh or dreamy)"
            ))),
        }
    }
}

/// Resolve the colors for `name`.
///
/// `fresh` ignores `count` and never touches `rng`. `dreamy` returns `max(8, count)` colors and
/// draws a saturation then a lightness for each of them.
pub fn palette(name: PaletteName, count: usize, rng: &mut PosterRng) -> Vec<Rgb> {
    match name {
        PaletteName::Fresh => FRESH_COLORS.to_vec(),
        PaletteName::Dreamy => dreamy_palette(count.max(DREAMY_MIN_COLORS), rng),
    }
}

fn dreamy_palette(k: usize, rng: &mut PosterRng) -> Vec<Rgb> {
    let (h0, h1) = DREAMY_HUE_RANGE;
    let step = if k > 1 { (h1 - h0) / (k - 1) as f64 } else { 0.0 };

    (0..k)
        .map(|i| {
            let h = h0 + step * i as f64;
            let s = rng.uniform(DREAMY_SATURATION_RANGE.0, DREAMY_SATURATION_RANGE.1);
            let l = rng.uniform(DREAMY_LIGHTNESS_RANGE.0, DREAMY_LIGHTNESS_RANGE.1);
            hls_to_rgb(h, l, s)
        })
        .collect()
}

/// Standard HLS -> RGB conversion, all inputs and outputs in `[0, 1]`; hue wraps.
pub fn hls_to_rgb(h: f64, l: f64, s: f64) -> Rgb {
    let h = h.rem_euclid(1.0);
    let l = l.clamp(0.0, 1.0);
    let s = s.clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgb::from_unit(l, l, l);
    }

    fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l <= 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgb::from_unit(
        hue_to_rgb(p, q, h + 1.0 / 3.0).clamp(0.0, 1.0),
        hue_to_rgb(p, q, h).clamp(0.0, 1.0),
        hue_to_rgb(p, q, h - 1.0 / 3.0).clamp(0.0, 1.0),
    )
}

/// Inverse of [`hls_to_rgb`]; returns `(h, l, s)`.
pub fn rgb_to_hls(c: Rgb) -> (f64, f64, f64) {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let l = (max + min) / 2.0;
    if max == min {
        return (0.0, l, 0.0);
    }

    let d = max - min;
    let s = if l <= 0.5 {
        d / (max + min)
    } else {
        d / (2.0 - max - min)
    };
    let rc = (max - c.r) / d;
    let gc = (max - c.g) / d;
    let bc = (max - c.b) / d;
    let h = if c.r == max {
        bc - gc
    } else if c.g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), l, s)
}
