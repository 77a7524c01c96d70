pub mod config;
pub mod error;
pub mod grid;
pub mod noise;
pub mod peaks;
pub mod polar;
pub mod render;
pub mod rng;

use std::time::Instant;

use tracing::info;

use config::Params;
use error::ClockError;
use grid::Grid;
use peaks::{Peak, PeakLabel};
use polar::{AngleGrid, CirclePoints};
use rng::{Rng, stream_seed};

pub struct Clock {
    pub angles: AngleGrid,
    /// One row per circle, one column per angle.
    pub radii: Grid<f64>,
    pub peaks: Vec<Peak>,
    pub labels: Vec<PeakLabel>,
    pub points: Vec<CirclePoints>,
    pub size: u32,
    pub rgba: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

pub fn generate(seed: u64, params: &Params) -> Result<(Clock, Vec<Timing>), ClockError> {
    params.validate()?;

    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Angle grid shared by every circle
    let t = Instant::now();
    let angles = AngleGrid::new(params.num_points);
    timings.push(Timing {
        name: "angles",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Noisy baseline circles
    let t = Instant::now();
    let mut radii = noise::noisy_circles(params, seed);
    timings.push(Timing {
        name: "circles",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Peak placement
    let t = Instant::now();
    let mut rng = Rng::new(stream_seed(seed, peaks::SALT_PEAKS, 0));
    let peaks = peaks::place_peaks(params, &mut rng);
    timings.push(Timing {
        name: "peak_place",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 4. Ramp peaks into their circles, label the tips
    let t = Instant::now();
    let labels = peaks::apply_peaks(&mut radii, &angles, &peaks, params.power);
    timings.push(Timing {
        name: "peak_apply",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 5. Project to x/y, thin out the base dots
    let t = Instant::now();
    let points = polar::project_circles(
        &radii,
        &angles,
        &peaks,
        params.base_keep_probability,
        seed,
    );
    timings.push(Timing {
        name: "project",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 6. Render
    let t = Instant::now();
    let rgba = render::render_clock(&points, &labels, params.image_size, params.dot_radius);
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    info!(
        seed,
        circles = params.num_circles,
        points = params.num_points,
        peaks = peaks.len(),
        total_ms,
        "generated clock"
    );

    let clock = Clock {
        angles,
        radii,
        peaks,
        labels,
        points,
        size: params.image_size,
        rgba,
    };

    Ok((clock, timings))
}
