use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::grid::Grid;
use crate::peaks::Peak;
use crate::rng::{Rng, stream_seed};

pub const SALT_SAMPLE: u64 = 0x5A3_B1E_0003;

/// `n` angles evenly spaced over [0, 2π). Shared by every circle.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleGrid {
    theta: Vec<f64>,
}

impl AngleGrid {
    pub fn new(n: usize) -> Self {
        let theta = (0..n).map(|i| TAU * i as f64 / n as f64).collect();
        Self { theta }
    }

    #[inline]
    pub fn theta(&self, i: usize) -> f64 {
        self.theta[i]
    }

    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }
}

#[inline]
pub fn to_cartesian(r: f64, theta: f64) -> [f64; 2] {
    let (s, c) = theta.sin_cos();
    [r * c, r * s]
}

/// Kept points of one circle, split by whether a peak covers the sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CirclePoints {
    pub peak: Vec<[f64; 2]>,
    pub base: Vec<[f64; 2]>,
}

/// Samples of circle `c` covered by at least one of its peaks.
pub fn peak_mask(num_points: usize, circle: usize, peaks: &[Peak]) -> Vec<bool> {
    let mut mask = vec![false; num_points];
    for p in peaks.iter().filter(|p| p.circle == circle) {
        mask[p.start..p.end].fill(true);
    }
    mask
}

/// Project every circle to Cartesian. Peak samples are always kept; other
/// samples survive with probability `keep_probability`.
pub fn project_circles(
    radii: &Grid<f64>,
    angles: &AngleGrid,
    peaks: &[Peak],
    keep_probability: f64,
    seed: u64,
) -> Vec<CirclePoints> {
    (0..radii.h)
        .into_par_iter()
        .map(|c| {
            let mut rng = Rng::new(stream_seed(seed, SALT_SAMPLE, c as u64));
            let mask = peak_mask(radii.w, c, peaks);
            let mut points = CirclePoints::default();
            for (i, (&r, covered)) in radii.row(c).iter().zip(mask).enumerate() {
                if covered {
                    points.peak.push(to_cartesian(r, angles.theta(i)));
                } else if rng.chance(keep_probability) {
                    points.base.push(to_cartesian(r, angles.theta(i)));
                }
            }
            points
        })
        .collect()
}
