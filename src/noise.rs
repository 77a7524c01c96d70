use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::config::Params;
use crate::grid::{Grid, linspace, wrap_index};
use crate::rng::{Rng, stream_seed};

pub const SALT_CIRCLES: u64 = 0xC1C_1E5_0001;

/// Most circles stay mildly wavy; the rest wobble up to `max_var`.
const MILD_PROBABILITY: f64 = 0.75;
const MILD_VARIANCE_CAP: f64 = 0.05;

/// Triangular variance envelope: climbs from `min_var` to `peak_var` over the
/// first half, recedes over the rest, then rotated by `shift` samples.
pub fn variance_envelope(n: usize, min_var: f64, peak_var: f64, shift: usize) -> Vec<f64> {
    let half = n / 2;
    let mut env = linspace(min_var, peak_var, half);
    env.extend(linspace(peak_var, min_var, n - half));

    if n == 0 {
        return env;
    }
    (0..n)
        .map(|i| env[wrap_index(i as i64 - shift as i64, n)])
        .collect()
}

/// Rotation (in samples) that places the envelope bump at `phase`.
#[inline]
pub fn phase_shift(phase: f64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    ((phase * n as f64 / TAU).round() as usize) % n
}

/// Fill `out` with one noisy circle around `base_radius`.
pub fn noisy_radii(rng: &mut Rng, base_radius: f64, min_var: f64, max_var: f64, out: &mut [f64]) {
    let n = out.len();
    let phase = rng.range_f64(0.0, TAU);
    // never let the split point exceed the configured ceiling
    let split = MILD_VARIANCE_CAP.min(max_var);
    let peak_var = if rng.chance(MILD_PROBABILITY) {
        rng.range_f64(min_var, split)
    } else {
        rng.range_f64(split, max_var)
    };

    let env = variance_envelope(n, min_var, peak_var, phase_shift(phase, n));
    for (r, v) in out.iter_mut().zip(env) {
        *r = base_radius * (1.0 + v * rng.signed_unit());
    }
}

/// Generate every circle's baseline radii. Row `c` of the result is circle `c`.
/// Each circle draws from its own stream, so rows are filled in parallel.
pub fn noisy_circles(params: &Params, seed: u64) -> Grid<f64> {
    let mut radii = Grid::new(params.num_points, params.num_circles);
    if params.num_points == 0 {
        return radii;
    }

    radii
        .data
        .par_chunks_mut(params.num_points)
        .enumerate()
        .for_each(|(c, row)| {
            let mut rng = Rng::new(stream_seed(seed, SALT_CIRCLES, c as u64));
            noisy_radii(&mut rng, params.base_radius, params.min_var, params.max_var, row);
        });

    radii
}
