// Single-threaded frame loop: capture -> detect -> classify/accumulate -> render -> display

use crate::core::drawing_session::{DrawingSession, SessionStatistics};
use crate::core::overlay_renderer::{Overlay, OverlayRenderer};
use crate::models::capture::{CaptureError, DisplayError};
use crate::platform::capture::FrameSource;
use crate::platform::display::{FrameSink, SinkControl};
use crate::platform::landmarks::HandLandmarkDetector;

#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
}

pub type LoopResult<T> = Result<T, LoopError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Flip each frame horizontally before detection
    pub mirror_input: bool,
    /// Stop after this many processed frames
    pub max_frames: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            mirror_input: true,
            max_frames: None,
        }
    }
}

/// Owns the external collaborators for one run
pub struct FrameLoop<'a> {
    source: &'a mut dyn FrameSource,
    detector: &'a mut dyn HandLandmarkDetector,
    sink: &'a mut dyn FrameSink,
    renderer: &'a OverlayRenderer,
    options: LoopOptions,
}

impl<'a> FrameLoop<'a> {
    pub fn new(
        source: &'a mut dyn FrameSource,
        detector: &'a mut dyn HandLandmarkDetector,
        sink: &'a mut dyn FrameSink,
        renderer: &'a OverlayRenderer,
        options: LoopOptions,
    ) -> Self {
        Self {
            source,
            detector,
            sink,
            renderer,
            options,
        }
    }

    /// Run until the source is exhausted, the sink asks to quit, or
    /// `max_frames` is reached. Each frame is fully applied before the next
    /// is captured, so stopping between frames needs no cleanup.
    pub fn run(&mut self, session: &mut DrawingSession) -> LoopResult<SessionStatistics> {
        log::info!(
            "Session {} started: source={}, detector={}",
            session.session_id(),
            self.source.describe(),
            self.detector.model_info()
        );

        let mut processed: u64 = 0;

        loop {
            if let Some(max) = self.options.max_frames {
                if processed >= max {
                    break;
                }
            }

            let mut frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(CaptureError::Decode { path, source }) => {
                    log::warn!("Skipping undecodable frame {}: {}", path, source);
                    self.detector.skip_frame();
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if self.options.mirror_input {
                frame.mirror();
            }

            let hand = match self.detector.detect(&frame) {
                Ok(hand) => hand,
                Err(e) => {
                    log::warn!("Hand detection failed, treating frame as no hand: {}", e);
                    None
                }
            };

            let (width, height) = (frame.width(), frame.height());
            let outcome = session.process_frame(hand.as_ref(), width, height);

            self.renderer.render(
                &mut frame.image,
                &Overlay {
                    status_text: outcome.gesture.status_text(),
                    status_color: outcome.gesture.status_color(),
                    cursor: outcome.cursor,
                    strokes: session.accumulator(),
                },
            );

            processed += 1;

            if self.sink.present(&frame)? == SinkControl::Quit {
                log::info!("Display requested quit");
                break;
            }
        }

        let stats = session.statistics();
        log::info!(
            "Session {} finished: {} frames ({} with a hand), {} strokes, {} erases, {} history entries",
            stats.session_id,
            stats.total_frames,
            stats.frames_with_hand,
            stats.strokes_completed,
            stats.erases,
            stats.history_len
        );

        Ok(stats)
    }
}
