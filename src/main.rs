use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use air_canvas_lib::core::config::Config;
use air_canvas_lib::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "air-canvas", about = "Draw in the air with hand gestures")]
struct Cli {
    /// Replay frames from a directory of images
    #[arg(long, conflicts_with = "camera")]
    frames: Option<PathBuf>,

    /// Capture from this camera index (requires the camera-opencv feature)
    #[arg(long)]
    camera: Option<i32>,

    /// Use recorded landmarks (JSON lines, one per frame) instead of live detection
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Write rendered frames as PNG files into this directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Show rendered frames in a window; press 'q' to quit (requires the camera-opencv feature)
    #[arg(long)]
    window: bool,

    /// Settings file (default: ~/.air_canvas/config/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Do not mirror frames before detection
    #[arg(long)]
    no_mirror: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("air_canvas=info,air_canvas_lib=info"))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };
    if cli.no_mirror {
        config.mirror_input = false;
    }

    log::info!("air-canvas v{} starting", env!("CARGO_PKG_VERSION"));
    println!("Started! Use gestures to control drawing. Press 'q' in the window to exit.");

    let stats = air_canvas_lib::run(RunOptions {
        config,
        frames_dir: cli.frames,
        camera: cli.camera,
        landmarks: cli.landmarks,
        output_dir: cli.output,
        window: cli.window,
        max_frames: cli.max_frames,
    })?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
