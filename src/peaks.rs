use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Params;
use crate::grid::{Grid, linspace};
use crate::polar::{AngleGrid, to_cartesian};
use crate::rng::Rng;

pub const SALT_PEAKS: u64 = 0x9EA_C5_0002;

/// A localized bump on one circle covering samples `start..end`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub circle: usize,
    pub start: usize,
    pub end: usize,
    pub peak_factor: f64,
    pub peak_size: usize,
}

/// Renders like the record listing printed by the clock binary:
/// `{'circle': 3, 'start': 120, 'end': 250, 'peak_factor': 1.5, 'peak_size': 130}`.
impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'circle': {}, 'start': {}, 'end': {}, 'peak_factor': {:?}, 'peak_size': {}}}",
            self.circle, self.start, self.end, self.peak_factor, self.peak_size
        )
    }
}

/// One line of the peak listing, `idx` being 0-based.
pub fn format_peak_line(idx: usize, peak: &Peak) -> String {
    format!("Peak {}: {}", idx + 1, peak)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeakLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Draw `num_peaks` peaks. Per peak the draw order is circle, size, start, factor.
pub fn place_peaks(params: &Params, rng: &mut Rng) -> Vec<Peak> {
    (0..params.num_peaks)
        .map(|_| {
            let circle = rng.range_usize(params.num_circles);
            let peak_size = rng.between(params.min_peak_size, params.max_peak_size);
            let start = rng.range_usize(params.num_points - peak_size);
            let peak_factor = rng.range_f64(params.min_peak_factor, params.max_peak_factor);
            Peak {
                circle,
                start,
                end: start + peak_size,
                peak_factor,
                peak_size,
            }
        })
        .collect()
}

/// Rise/fall multiplier of length `size`.
/// Rise covers the first ceil(size/2) samples, fall the remaining floor(size/2).
pub fn ramp(peak_factor: f64, size: usize, power: i32) -> Vec<f64> {
    let shape = |t: f64| 1.0 + (peak_factor - 1.0) * t.powi(power);
    let up = linspace(0.0, 1.0, size.div_ceil(2));
    let down = linspace(1.0, 0.0, size / 2);
    up.into_iter().chain(down).map(shape).collect()
}

/// Multiply each peak's ramp into its circle, in generation order, and label
/// the tallest sample. Overlapping peaks compound multiplicatively.
pub fn apply_peaks(
    radii: &mut Grid<f64>,
    angles: &AngleGrid,
    peaks: &[Peak],
    power: i32,
) -> Vec<PeakLabel> {
    peaks
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let segment = &mut radii.row_mut(p.circle)[p.start..p.end];
            for (r, m) in segment.iter_mut().zip(ramp(p.peak_factor, p.peak_size, power)) {
                *r *= m;
            }

            let tip = p.start + argmax(segment);
            let [x, y] = to_cartesian(radii.get(tip, p.circle), angles.theta(tip));
            debug!(peak = idx + 1, circle = p.circle, tip, "applied peak");
            PeakLabel {
                x,
                y,
                text: format!("peak {}", idx + 1),
            }
        })
        .collect()
}

/// Index of the first maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_sample_linear_ramp() {
        assert_eq!(ramp(2.0, 2, 1), vec![1.0, 2.0]);
    }

    #[test]
    fn ramp_starts_at_one_and_reaches_factor_mid_way() {
        for size in [2usize, 3, 80, 81, 159] {
            let r = ramp(1.7, size, 7);
            assert_eq!(r.len(), size);
            assert_eq!(r[0], 1.0);
            let mid = size / 2;
            assert!((r[mid] - 1.7).abs() < 1e-12, "size {size}: r[{mid}] = {}", r[mid]);
            assert!(r.iter().all(|&v| v >= 1.0));
        }
    }

    #[test]
    fn ramp_is_symmetric_for_even_sizes() {
        let r = ramp(1.5, 10, 7);
        for i in 0..5 {
            assert!((r[i] - r[9 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn placed_peaks_fit_their_circle() {
        let params = Params::default();
        let mut rng = Rng::new(3);
        for _ in 0..50 {
            for p in place_peaks(&params, &mut rng) {
                assert!(p.circle < params.num_circles);
                assert!(p.start < p.end && p.end <= params.num_points);
                assert_eq!(p.end - p.start, p.peak_size);
                assert!((params.min_peak_size..params.max_peak_size).contains(&p.peak_size));
                assert!(p.peak_factor >= params.min_peak_factor);
                assert!(p.peak_factor < params.max_peak_factor);
            }
        }
    }

    #[test]
    fn single_peak_on_unit_circle() {
        let angles = AngleGrid::new(8);
        let mut radii = Grid::new(8, 1);
        radii.data.fill(1.0);
        let peak = Peak {
            circle: 0,
            start: 0,
            end: 2,
            peak_factor: 2.0,
            peak_size: 2,
        };

        let labels = apply_peaks(&mut radii, &angles, &[peak], 1);

        assert_eq!(radii.get(0, 0), 1.0);
        assert_eq!(radii.get(1, 0), 2.0);
        assert!(radii.row(0)[2..].iter().all(|&r| r == 1.0));
        let [x, y] = to_cartesian(2.0, angles.theta(1));
        assert_eq!(labels, vec![PeakLabel { x, y, text: "peak 1".into() }]);
    }

    #[test]
    fn overlapping_peaks_compound() {
        let angles = AngleGrid::new(6);
        let mut radii = Grid::new(6, 1);
        radii.data.fill(1.0);
        let p = Peak {
            circle: 0,
            start: 1,
            end: 3,
            peak_factor: 2.0,
            peak_size: 2,
        };

        let labels = apply_peaks(&mut radii, &angles, &[p.clone(), p], 1);

        assert_eq!(radii.get(2, 0), 4.0);
        assert_eq!(labels[1].text, "peak 2");
    }

    #[test]
    fn label_sits_on_scaled_baseline() {
        let params = Params::default();
        let angles = AngleGrid::new(params.num_points);
        let mut radii = crate::noise::noisy_circles(&params, 21);
        let peaks = place_peaks(&params, &mut Rng::new(21));
        assert_eq!(peaks.len(), params.num_peaks);
        // one peak at a time, each against the radii just before it lands
        for p in &peaks {
            let baseline = radii.clone();
            let labels = apply_peaks(&mut radii, &angles, std::slice::from_ref(p), params.power);
            let multipliers = ramp(p.peak_factor, p.peak_size, params.power);
            let tip = (p.start..p.end)
                .find(|&i| {
                    let [x, y] = to_cartesian(radii.get(i, p.circle), angles.theta(i));
                    x == labels[0].x && y == labels[0].y
                })
                .unwrap();
            let expected = baseline.get(tip, p.circle) * multipliers[tip - p.start];
            assert_eq!(radii.get(tip, p.circle), expected);
            assert!(multipliers[tip - p.start] >= 1.0);
        }
    }

    #[test]
    fn display_matches_record_listing() {
        let p = Peak {
            circle: 3,
            start: 120,
            end: 250,
            peak_factor: 1.5,
            peak_size: 130,
        };
        assert_eq!(
            p.to_string(),
            "{'circle': 3, 'start': 120, 'end': 250, 'peak_factor': 1.5, 'peak_size': 130}"
        );
    }

    #[test]
    fn listing_line_is_one_based() {
        let p = Peak {
            circle: 0,
            start: 10,
            end: 92,
            peak_factor: 2.0,
            peak_size: 82,
        };
        assert_eq!(
            format_peak_line(0, &p),
            "Peak 1: {'circle': 0, 'start': 10, 'end': 92, 'peak_factor': 2.0, 'peak_size': 82}"
        );
        assert!(format_peak_line(7, &p).starts_with("Peak 8: {"));
    }
}
