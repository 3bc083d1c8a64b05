//! Utilities for generating site sets for examples, benchmarks, and test cases.
//!
//! Everything here is deterministic, so benchmark runs are comparable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Point;

/// An `n` by `n` grid of sites with spacing `step`, starting at the origin.
///
/// Grids are about as degenerate as inputs get: every row is a run of sites
/// sharing a `y` coordinate, and every square of four neighbors is cocircular.
pub fn grid(n: usize, step: f64) -> Vec<Point> {
    let mut ret = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            ret.push(Point::new(i as f64 * step, j as f64 * step));
        }
    }
    ret
}

/// Like [`grid`], but with every site nudged by a pseudo-random amount of up
/// to `jitter` in each direction.
pub fn jittered_grid(n: usize, step: f64, jitter: f64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    grid(n, step)
        .into_iter()
        .map(|p| {
            let dx = rng.random_range(-jitter..=jitter);
            let dy = rng.random_range(-jitter..=jitter);
            Point::new(p.x + dx, p.y + dy)
        })
        .collect()
}

/// `rings` concentric circles of `per_ring` sites each, around the origin.
///
/// Each ring is rotated by half a step relative to the one inside it, and the
/// radii grow geometrically so that no four sites are cocircular.
pub fn rings(rings: usize, per_ring: usize) -> Vec<Point> {
    let mut ret = Vec::with_capacity(rings * per_ring);
    let step = std::f64::consts::TAU / per_ring as f64;
    for r in 0..rings {
        let radius = 10.0 * 1.5f64.powi(r as i32);
        let offset = if r % 2 == 0 { 0.0 } else { step / 2.0 };
        for k in 0..per_ring {
            let theta = offset + k as f64 * step + 0.01 * r as f64;
            ret.push(Point::new(radius * theta.cos(), radius * theta.sin()));
        }
    }
    ret
}

/// `n` sites on a golden-angle (sunflower) spiral of radius about `radius`.
///
/// This is a nicely uniform point set with no special alignments.
pub fn spiral(n: usize, radius: f64) -> Vec<Point> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());
    (0..n)
        .map(|i| {
            let r = radius * ((i as f64 + 0.5) / n as f64).sqrt();
            let theta = i as f64 * golden_angle;
            Point::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

/// `n` pseudo-random sites in the square `[0, size) x [0, size)`.
///
/// `size` must be positive.
pub fn uniform(n: usize, size: f64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.random_range(0.0..size), rng.random_range(0.0..size)))
        .collect()
}
