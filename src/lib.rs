pub mod core;
pub mod models;
pub mod platform;

use anyhow::{bail, Context};
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::drawing_session::{DrawingSession, SessionStatistics};
use crate::core::frame_loop::{FrameLoop, LoopOptions};
use crate::core::overlay_renderer::OverlayRenderer;
use crate::platform::capture::{FrameSource, ImageSequenceSource};
use crate::platform::display::{FrameSink, PngDirectorySink};
use crate::platform::landmarks::{HandLandmarkDetector, ReplayDetector};

/// Where frames come from, where landmarks come from, and where rendered frames go
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Config,
    /// Directory of still frames to replay instead of a camera
    pub frames_dir: Option<PathBuf>,
    /// Camera index (needs the `camera-opencv` feature)
    pub camera: Option<i32>,
    /// JSON-lines landmark recording to use instead of live detection
    pub landmarks: Option<PathBuf>,
    /// Directory to write rendered frames to
    pub output_dir: Option<PathBuf>,
    /// Show rendered frames in a window (needs the `camera-opencv` feature)
    pub window: bool,
    pub max_frames: Option<u64>,
}

fn open_source(options: &RunOptions) -> anyhow::Result<Box<dyn FrameSource>> {
    if let Some(dir) = &options.frames_dir {
        let source = ImageSequenceSource::open(dir)
            .with_context(|| format!("Failed to open frame directory {}", dir.display()))?;
        return Ok(Box::new(source));
    }

    #[cfg(feature = "camera-opencv")]
    {
        if let Some(index) = options.camera {
            let camera = crate::platform::capture::OpenCvCamera::open(index, options.config.target_fps)
                .with_context(|| format!("Failed to open camera {}", index))?;
            return Ok(Box::new(camera));
        }
    }

    if options.camera.is_some() {
        bail!("Camera capture needs the 'camera-opencv' feature");
    }
    bail!("No frame source: pass a frame directory or a camera index")
}

fn open_detector(options: &RunOptions) -> anyhow::Result<Box<dyn HandLandmarkDetector>> {
    if let Some(path) = &options.landmarks {
        let detector = ReplayDetector::open(path)
            .with_context(|| format!("Failed to open landmark recording {}", path.display()))?;
        return Ok(Box::new(detector));
    }

    #[cfg(feature = "ml-pyo3")]
    let detector: Box<dyn HandLandmarkDetector> = Box::new(
        crate::platform::landmarks::PyO3HandDetector::new(&options.config.detector)
            .context("Failed to start MediaPipe hand detector")?,
    );

    #[cfg(not(feature = "ml-pyo3"))]
    let detector: Box<dyn HandLandmarkDetector> = {
        log::warn!("No hand detector available, every frame will report no hand");
        Box::new(crate::platform::landmarks::NoHandDetector)
    };

    Ok(detector)
}

fn open_sink(options: &RunOptions) -> anyhow::Result<Box<dyn FrameSink>> {
    if let Some(dir) = &options.output_dir {
        let sink = PngDirectorySink::create(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        return Ok(Box::new(sink));
    }

    #[cfg(feature = "camera-opencv")]
    {
        if options.window {
            let window = crate::platform::display::OpenCvWindow::open("Virtual Air Canvas")
                .context("Failed to open preview window")?;
            return Ok(Box::new(window));
        }
    }

    if options.window {
        bail!("The preview window needs the 'camera-opencv' feature");
    }
    bail!("No output: pass an output directory or request a window")
}

fn build_renderer(config: &Config) -> anyhow::Result<OverlayRenderer> {
    let renderer = OverlayRenderer::new(config.render_style())?;
    match &config.font_path {
        Some(path) => {
            let font = OverlayRenderer::load_font(path)?;
            Ok(renderer.with_font(font))
        }
        None => Ok(renderer),
    }
}

/// Build the collaborators described by `options` and run one drawing session
pub fn run(options: RunOptions) -> anyhow::Result<SessionStatistics> {
    options.config.validate().context("Invalid configuration")?;

    let mut source = open_source(&options)?;
    let mut detector = open_detector(&options)?;
    let mut sink = open_sink(&options)?;
    let renderer = build_renderer(&options.config)?;

    let loop_options = LoopOptions {
        mirror_input: options.config.mirror_input,
        max_frames: options.max_frames,
    };

    let mut session = DrawingSession::new();
    let stats = FrameLoop::new(
        source.as_mut(),
        detector.as_mut(),
        sink.as_mut(),
        &renderer,
        loop_options,
    )
    .run(&mut session)?;

    Ok(stats)
}
