use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rayon::prelude::*;

use crate::Clock;
use crate::error::ClockError;
use crate::peaks::PeakLabel;
use crate::polar::CirclePoints;

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
const PEAK_SHADE: [u8; 4] = [169, 169, 169, 255]; // darkgray
const INK: [u8; 4] = [0, 0, 0, 255];

// ColorBrewer "Greys", white to black
const GREYS: [[u8; 4]; 9] = [
    [255, 255, 255, 255],
    [240, 240, 240, 255],
    [217, 217, 217, 255],
    [189, 189, 189, 255],
    [150, 150, 150, 255],
    [115, 115, 115, 255],
    [82, 82, 82, 255],
    [37, 37, 37, 255],
    [0, 0, 0, 255],
];

const MARGIN: f64 = 1.05;
const LABEL_ARM: i64 = 3;
const LABEL_FONT: u32 = 9;
const TITLE_FONT: u32 = 12;
const TITLE_OFFSET: (i32, i32) = (8, 8);

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

/// Sample the Greys ramp at `t` in [0, 1].
pub fn greys(t: f32) -> [u8; 4] {
    let pos = t.clamp(0.0, 1.0) * (GREYS.len() - 1) as f32;
    let i = (pos.floor() as usize).min(GREYS.len() - 2);
    lerp_color(GREYS[i], GREYS[i + 1], pos - i as f32)
}

/// Shade of circle `i` among `n`.
pub fn circle_shade(i: usize, n: usize) -> [u8; 4] {
    greys(i as f32 / n.max(1) as f32)
}

/// Square, origin-centred window onto the clock. Equal aspect by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub half_extent: f64,
    pub size: u32,
}

impl Viewport {
    pub fn fit(points: &[CirclePoints], labels: &[PeakLabel], size: u32) -> Self {
        let reach = points
            .iter()
            .flat_map(|c| c.peak.iter().chain(&c.base))
            .map(|p| p[0].abs().max(p[1].abs()))
            .chain(labels.iter().map(|l| l.x.abs().max(l.y.abs())))
            .fold(0.0f64, f64::max);
        let half_extent = if reach > 0.0 { reach * MARGIN } else { 1.0 };
        Self { half_extent, size }
    }

    /// World to pixel, y pointing down.
    #[inline]
    pub fn to_pixel(&self, p: [f64; 2]) -> (i64, i64) {
        let span = 2.0 * self.half_extent;
        let px = (p[0] + self.half_extent) / span * self.size as f64;
        let py = (self.half_extent - p[1]) / span * self.size as f64;
        (px.floor() as i64, py.floor() as i64)
    }
}

/// Per-row list of (column, color) writes. Later writes win.
struct Splats {
    rows: Vec<Vec<(usize, [u8; 4])>>,
    size: usize,
}

impl Splats {
    fn new(size: usize) -> Self {
        Self {
            rows: vec![Vec::new(); size],
            size,
        }
    }

    #[inline]
    fn put(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.size as i64 || y >= self.size as i64 {
            return;
        }
        self.rows[y as usize].push((x as usize, color));
    }

    fn disc(&mut self, (cx, cy): (i64, i64), radius: i64, color: [u8; 4]) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn cross(&mut self, (cx, cy): (i64, i64), arm: i64, color: [u8; 4]) {
        for d in -arm..=arm {
            self.put(cx + d, cy, color);
            self.put(cx, cy + d, color);
        }
    }
}

/// Rasterize the clock into an RGBA8 buffer of `size`×`size` pixels.
/// Base dots of each circle go down first, then its peak dots; label
/// anchors are marked with a cross on top.
pub fn render_clock(
    points: &[CirclePoints],
    labels: &[PeakLabel],
    size: u32,
    dot_radius: u32,
) -> Vec<u8> {
    let view = Viewport::fit(points, labels, size);
    let w = size as usize;
    let r = dot_radius as i64;

    let mut splats = Splats::new(w);
    for (i, circle) in points.iter().enumerate() {
        let shade = circle_shade(i, points.len());
        for &p in &circle.base {
            splats.disc(view.to_pixel(p), r, shade);
        }
        for &p in &circle.peak {
            splats.disc(view.to_pixel(p), r, PEAK_SHADE);
        }
    }
    for l in labels {
        splats.cross(view.to_pixel([l.x, l.y]), LABEL_ARM, INK);
    }

    let mut rgba = vec![0u8; w * w * 4];
    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for px in row.chunks_exact_mut(4) {
            px.copy_from_slice(&BACKGROUND);
        }
        for &(x, color) in &splats.rows[y] {
            row[x * 4..x * 4 + 4].copy_from_slice(&color);
        }
    });

    rgba
}

#[inline]
fn rgb(c: [u8; 4]) -> RGBColor {
    RGBColor(c[0], c[1], c[2])
}

fn plot_err<E: std::fmt::Display>(e: E) -> ClockError {
    ClockError::Plot(e.to_string())
}

/// Draw the full figure, labels and title included, as an SVG document.
pub fn render_svg(clock: &Clock, title: &str) -> Result<String, ClockError> {
    let view = Viewport::fit(&clock.points, &clock.labels, clock.size);
    let e = view.half_extent;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (clock.size, clock.size)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let area = root.apply_coord_spec(Cartesian2d::<RangedCoordf64, RangedCoordf64>::new(
            -e..e,
            -e..e,
            root.get_pixel_range(),
        ));

        let n = clock.points.len();
        for (i, circle) in clock.points.iter().enumerate() {
            let base = rgb(circle_shade(i, n)).filled();
            for &[x, y] in &circle.base {
                area.draw(&Circle::new((x, y), 1, base)).map_err(plot_err)?;
            }
            let peak = rgb(PEAK_SHADE).filled();
            for &[x, y] in &circle.peak {
                area.draw(&Circle::new((x, y), 1, peak)).map_err(plot_err)?;
            }
        }

        let label_style = ("sans-serif", LABEL_FONT)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for l in &clock.labels {
            area.draw(&Text::new(l.text.as_str(), (l.x, l.y), &label_style))
                .map_err(plot_err)?;
        }

        root.draw(&Text::new(
            title,
            TITLE_OFFSET,
            ("sans-serif", TITLE_FONT).into_font().color(&BLACK),
        ))
        .map_err(plot_err)?;
        root.present().map_err(plot_err)?;
    }
    Ok(svg)
}
