//! Seeded random stream shared by palette resolution and flower planning.
//!
//! A poster render owns exactly one [`PosterRng`]. Draws happen in this order:
//!
//! 1. dreamy palette only: `(saturation, lightness)` per hue, hues ascending
//! 2. per layer: `cx`, `cy`, `radius`, `petal_factor`, color index
//!
//! Reordering any draw changes every poster produced from a given seed.

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

#[derive(Clone, Debug)]
pub struct PosterRng {
    inner: Pcg64,
    draws: u64,
}

impl PosterRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.draws += 1;
        self.inner.r#gen::<f64>()
    }

    /// Uniform in `[lo, hi]`; `lo == hi` is allowed and still consumes one draw.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.draws += 1;
        self.inner.gen_range(0..len)
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}
