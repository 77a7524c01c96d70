use serde::{Deserialize, Serialize};

use crate::error::ClockError;

/// All tunable parameters of a clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Params {
    pub title: String,

    // Circles
    pub num_points: usize,
    pub num_circles: usize,
    pub base_radius: f64,
    pub min_var: f64,
    pub max_var: f64,

    // Peaks
    pub power: i32,
    pub num_peaks: usize,
    pub min_peak_size: usize,
    pub max_peak_size: usize,
    pub min_peak_factor: f64,
    pub max_peak_factor: f64,

    // Rendering
    pub base_keep_probability: f64,
    pub image_size: u32,
    pub dot_radius: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            title: "Version 1.0.56 (Labeled Peaks, Base 1.0)".to_string(),
            num_points: 2000,
            num_circles: 10,
            base_radius: 1.0,
            min_var: 0.01,
            max_var: 0.10,
            power: 7,
            num_peaks: 8,
            min_peak_size: 80,
            max_peak_size: 160,
            min_peak_factor: 1.05,
            max_peak_factor: 2.0,
            base_keep_probability: 0.1,
            image_size: 800,
            dot_radius: 1,
        }
    }
}

impl Params {
    /// Reject parameter sets the pipeline cannot draw from.
    /// Peak bounds are only checked when peaks are requested.
    pub fn validate(&self) -> Result<(), ClockError> {
        let fail = |msg: String| Err(ClockError::InvalidParams(msg));

        if self.num_points == 0 {
            return fail("num_points must be positive".into());
        }
        if self.num_circles == 0 {
            return fail("num_circles must be positive".into());
        }
        if !(self.base_radius > 0.0) {
            return fail(format!("base_radius must be positive, got {}", self.base_radius));
        }
        if !(0.0 <= self.min_var && self.min_var <= self.max_var && self.max_var < 1.0) {
            return fail(format!(
                "variance range must satisfy 0 <= min_var <= max_var < 1, got [{}, {}]",
                self.min_var, self.max_var
            ));
        }
        if !(0.0..=1.0).contains(&self.base_keep_probability) {
            return fail(format!(
                "base_keep_probability must be in [0, 1], got {}",
                self.base_keep_probability
            ));
        }
        if self.image_size == 0 {
            return fail("image_size must be positive".into());
        }

        if self.num_peaks > 0 {
            if self.min_peak_size == 0 || self.min_peak_size >= self.max_peak_size {
                return fail(format!(
                    "peak size range must satisfy 1 <= min < max, got [{}, {})",
                    self.min_peak_size, self.max_peak_size
                ));
            }
            if self.max_peak_size > self.num_points {
                return fail(format!(
                    "max_peak_size {} does not fit in {} points",
                    self.max_peak_size, self.num_points
                ));
            }
            if !(1.0 <= self.min_peak_factor && self.min_peak_factor <= self.max_peak_factor) {
                return fail(format!(
                    "peak factor range must satisfy 1 <= min <= max, got [{}, {})",
                    self.min_peak_factor, self.max_peak_factor
                ));
            }
        }

        Ok(())
    }
}
