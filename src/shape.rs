use std::f64::consts::TAU;

use crate::foundation::core::{BezPath, Point};

/// Samples per rose outline, independent of the poster config.
pub const OUTLINE_POINTS: usize = 400;

/// Closed rose-curve polygon in normalized poster space.
#[derive(Clone, Debug, PartialEq)]
pub struct PetalOutline {
    pub center: Point,
    pub points: Vec<Point>,
}

/// Rose curve `r(θ) = radius * (1 + petal_factor * cos(petals * θ))` around `center`.
///
/// θ runs over `[0, 2π]` inclusive, so the first and last samples coincide.
pub fn rose_outline(center: Point, radius: f64, petals: u32, petal_factor: f64) -> PetalOutline {
    let last = (OUTLINE_POINTS - 1) as f64;
    let p = f64::from(petals);

    let points = (0..OUTLINE_POINTS)
        .map(|i| {
            let theta = TAU * i as f64 / last;
            let r = radius * (1.0 + petal_factor * (p * theta).cos());
            Point::new(center.x + r * theta.cos(), center.y + r * theta.sin())
        })
        .collect();

    PetalOutline { center, points }
}

impl PetalOutline {
    /// Every point moved toward `self.center` by `scale` (`1.0` keeps the outline as is).
    pub fn scaled_toward_center(&self, scale: f64) -> PetalOutline {
        let c = self.center;
        PetalOutline {
            center: c,
            points: self
                .points
                .iter()
                .map(|p| Point::new(c.x + (p.x - c.x) * scale, c.y + (p.y - c.y) * scale))
                .collect(),
        }
    }

    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut it = self.points.iter();
        if let Some(&first) = it.next() {
            path.move_to(first);
            for &p in it {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }

    /// Axis-aligned bounds as `(min, max)`; `None` for an empty outline.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}
