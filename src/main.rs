use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use scribble_clock::config::Params;
use scribble_clock::peaks::{Peak, format_peak_line};
use scribble_clock::render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Draw a scribble clock: noisy concentric circles with labelled peaks")]
struct Args {
    /// RNG seed (derived from the clock when omitted)
    seed: Option<u64>,

    /// Directory for clock.png, clock.svg and peaks.json
    #[arg(default_value = "artifacts")]
    out_dir: PathBuf,

    /// Title drawn in the top-left corner
    #[arg(long)]
    title: Option<String>,
}

#[derive(Serialize)]
struct Manifest<'a> {
    seed: u64,
    params: &'a Params,
    peaks: &'a [Peak],
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut params = Params::default();
    if let Some(title) = args.title {
        params.title = title;
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    info!(
        seed,
        circles = params.num_circles,
        points = params.num_points,
        peaks = params.num_peaks,
        "generating clock"
    );

    let (clock, timings) = scribble_clock::generate(seed, &params)?;

    println!("Peak array used for plotting:");
    for (idx, peak) in clock.peaks.iter().enumerate() {
        println!("{}", format_peak_line(idx, peak));
    }

    for t in &timings {
        info!("{:20} {:8.1} ms", t.name, t.ms);
    }

    let png = args.out_dir.join("clock.png");
    image::save_buffer(&png, &clock.rgba, clock.size, clock.size, image::ColorType::Rgba8)
        .with_context(|| format!("failed to save {}", png.display()))?;
    info!("saved {}", png.display());

    let svg = args.out_dir.join("clock.svg");
    let doc = render::render_svg(&clock, &params.title)?;
    std::fs::write(&svg, doc).with_context(|| format!("failed to write {}", svg.display()))?;
    info!("saved {}", svg.display());

    let manifest = args.out_dir.join("peaks.json");
    let json = serde_json::to_string_pretty(&Manifest {
        seed,
        params: &params,
        peaks: &clock.peaks,
    })?;
    std::fs::write(&manifest, json)
        .with_context(|| format!("failed to write {}", manifest.display()))?;
    info!("saved {}", manifest.display());

    Ok(())
}
