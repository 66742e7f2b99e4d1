// End-to-end runs of the frame loop with in-memory collaborators

use std::collections::VecDeque;
use std::io::Cursor;

use image::{Rgb, RgbImage};

use air_canvas_lib::core::drawing_session::DrawingSession;
use air_canvas_lib::core::frame_loop::{FrameLoop, LoopOptions};
use air_canvas_lib::core::overlay_renderer::{OverlayRenderer, RenderStyle, STROKE_COLOR};
use air_canvas_lib::models::capture::{CaptureResult, DisplayResult, RawFrame};
use air_canvas_lib::models::detection::{DetectionError, DetectionResult};
use air_canvas_lib::models::gesture::Gesture;
use air_canvas_lib::models::hand::{Finger, HandLandmarks, Handedness, Keypoint3D, HAND_LANDMARK_COUNT};
use air_canvas_lib::models::stroke::{PixelPoint, StrokePoint};
use air_canvas_lib::platform::capture::{FrameSource, ImageSequenceSource};
use air_canvas_lib::platform::display::{FrameSink, SinkControl};
use air_canvas_lib::platform::landmarks::{HandLandmarkDetector, ReplayDetector};

const WIDTH: u32 = 200;
const HEIGHT: u32 = 100;
const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

struct MemorySource {
    remaining: usize,
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> CaptureResult<Option<RawFrame>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(RawFrame::new(RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND))))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[derive(Default)]
struct CollectingSink {
    frames: Vec<RawFrame>,
    quit_after: Option<usize>,
}

impl FrameSink for CollectingSink {
    fn present(&mut self, frame: &RawFrame) -> DisplayResult<SinkControl> {
        self.frames.push(frame.clone());
        match self.quit_after {
            Some(n) if self.frames.len() >= n => Ok(SinkControl::Quit),
            _ => Ok(SinkControl::Continue),
        }
    }
}

/// Scripted detector: `Ok(hand)` per frame, or an inference failure
struct ScriptedDetector {
    script: VecDeque<DetectionResult<Option<HandLandmarks>>>,
}

impl HandLandmarkDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &RawFrame) -> DetectionResult<Option<HandLandmarks>> {
        self.script.pop_front().unwrap_or(Ok(None))
    }

    fn is_initialized(&self) -> bool {
        true
    }

    fn model_info(&self) -> String {
        "scripted".to_string()
    }
}

/// Upright hand; `straight` lists index, middle, ring, pinky
fn hand(straight: [bool; 4], tip: (f32, f32)) -> HandLandmarks {
    let mut landmarks = [Keypoint3D::new(0.5, 0.9, 0.0); HAND_LANDMARK_COUNT];
    for (finger, is_straight) in Finger::ALL.into_iter().zip(straight) {
        landmarks[finger.pip().index()] = Keypoint3D::new(0.5, 0.6, 0.0);
        let y = if is_straight { 0.4 } else { 0.7 };
        landmarks[finger.tip().index()] = Keypoint3D::new(0.5, y, 0.0);
    }
    if straight[0] {
        landmarks[Finger::Index.tip().index()] = Keypoint3D::new(tip.0, tip.1, 0.0);
    }
    HandLandmarks::new(Handedness::Right, landmarks, 0.9)
}

fn pointing(x: f32, y: f32) -> HandLandmarks {
    hand([true, false, false, false], (x, y))
}

fn fist() -> HandLandmarks {
    hand([false, false, false, false], (0.5, 0.5))
}

fn open_palm() -> HandLandmarks {
    hand([true, true, true, true], (0.5, 0.4))
}

fn unmirrored(max_frames: Option<u64>) -> LoopOptions {
    LoopOptions {
        mirror_input: false,
        max_frames,
    }
}

#[test]
fn test_draw_stop_draw_renders_two_separate_strokes() {
    let script = vec![
        Ok(Some(pointing(0.125, 0.5))),
        Ok(Some(pointing(0.25, 0.5))),
        Ok(Some(fist())),
        Ok(Some(fist())),
        Ok(Some(pointing(0.75, 0.5))),
        Ok(Some(pointing(0.875, 0.5))),
    ];
    let mut source = MemorySource { remaining: script.len() };
    let mut detector = ScriptedDetector { script: script.into() };
    let mut sink = CollectingSink::default();
    let renderer = OverlayRenderer::new(RenderStyle::default()).unwrap();
    let mut session = DrawingSession::new();

    let stats = FrameLoop::new(&mut source, &mut detector, &mut sink, &renderer, unmirrored(None))
        .run(&mut session)
        .unwrap();

    assert_eq!(stats.total_frames, 6);
    assert_eq!(stats.strokes_completed, 1);

    let history: Vec<StrokePoint> = session.accumulator().history().copied().collect();
    assert_eq!(
        history,
        vec![
            StrokePoint::Point(PixelPoint::new(175, 50)),
            StrokePoint::Point(PixelPoint::new(150, 50)),
            StrokePoint::Break,
            StrokePoint::Point(PixelPoint::new(50, 50)),
            StrokePoint::Point(PixelPoint::new(25, 50)),
        ]
    );

    let last = &sink.frames.last().unwrap().image;
    assert_eq!(*last.get_pixel(40, 50), STROKE_COLOR);
    assert_eq!(*last.get_pixel(160, 50), STROKE_COLOR);
    assert_eq!(*last.get_pixel(100, 50), BACKGROUND, "strokes must not be joined");
}

#[test]
fn test_detector_failure_mid_stroke_breaks_the_stroke() {
    let script = vec![
        Ok(Some(pointing(0.10, 0.5))),
        Err(DetectionError::InferenceFailed("model crashed".to_string())),
        Ok(Some(pointing(0.50, 0.5))),
    ];
    let mut source = MemorySource { remaining: script.len() };
    let mut detector = ScriptedDetector { script: script.into() };
    let mut sink = CollectingSink::default();
    let renderer = OverlayRenderer::new(RenderStyle::default()).unwrap();
    let mut session = DrawingSession::new();

    let stats = FrameLoop::new(&mut source, &mut detector, &mut sink, &renderer, unmirrored(None))
        .run(&mut session)
        .unwrap();

    assert_eq!(stats.total_frames, 3);
    assert_eq!(stats.frames_with_hand, 2);
    assert_eq!(stats.gesture_frames.get("no_hand"), Some(&1));
    assert_eq!(session.accumulator().len(), 3);
    assert_eq!(session.accumulator().segments().count(), 0);
}

#[test]
fn test_erase_gesture_clears_rendered_canvas() {
    let script = vec![
        Ok(Some(pointing(0.125, 0.5))),
        Ok(Some(pointing(0.5, 0.5))),
        Ok(Some(open_palm())),
    ];
    let mut source = MemorySource { remaining: script.len() };
    let mut detector = ScriptedDetector { script: script.into() };
    let mut sink = CollectingSink::default();
    let renderer = OverlayRenderer::new(RenderStyle::default()).unwrap();
    let mut session = DrawingSession::new();

    FrameLoop::new(&mut source, &mut detector, &mut sink, &renderer, unmirrored(None))
        .run(&mut session)
        .unwrap();

    assert!(session.accumulator().is_empty());
    assert_eq!(session.last_gesture(), Some(Gesture::AllStraight));

    let before_erase = &sink.frames[1].image;
    let after_erase = &sink.frames[2].image;
    assert_eq!(*before_erase.get_pixel(60, 50), STROKE_COLOR);
    assert_eq!(*after_erase.get_pixel(60, 50), BACKGROUND);
    // Only the status text is left, drawn in the erase colour
    let status_pixels = after_erase
        .enumerate_pixels()
        .filter(|(_, _, p)| **p == Gesture::AllStraight.status_color())
        .count();
    assert!(status_pixels > 0);
    assert!(after_erase
        .enumerate_pixels()
        .all(|(_, y, p)| y <= 40 || *p == BACKGROUND));
}

#[test]
fn test_sink_quit_and_max_frames_stop_the_loop() {
    let renderer = OverlayRenderer::new(RenderStyle::default()).unwrap();

    let mut source = MemorySource { remaining: 10 };
    let mut detector = ScriptedDetector { script: VecDeque::new() };
    let mut sink = CollectingSink {
        quit_after: Some(3),
        ..Default::default()
    };
    let mut session = DrawingSession::new();
    let stats = FrameLoop::new(&mut source, &mut detector, &mut sink, &renderer, unmirrored(None))
        .run(&mut session)
        .unwrap();
    assert_eq!(stats.total_frames, 3);

    let mut source = MemorySource { remaining: 10 };
    let mut sink = CollectingSink::default();
    let mut session = DrawingSession::new();
    let stats = FrameLoop::new(&mut source, &mut detector, &mut sink, &renderer, unmirrored(Some(4)))
        .run(&mut session)
        .unwrap();
    assert_eq!(stats.total_frames, 4);
    assert_eq!(sink.frames.len(), 4);
}

#[test]
fn test_replay_recording_drives_the_loop() {
    let lines = [
        serde_json::to_string(&pointing(0.25, 0.5)).unwrap(),
        serde_json::to_string(&pointing(0.50, 0.5)).unwrap(),
        "null".to_string(),
    ];
    let recording = lines.join("\n");

    let mut source = MemorySource { remaining: 3 };
    let mut detector = ReplayDetector::from_reader(Cursor::new(recording), "inline".to_string());
    let mut sink = CollectingSink::default();
    let renderer = OverlayRenderer::new(RenderStyle::default()).unwrap();
    let mut session = DrawingSession::new();

    let stats = FrameLoop::new(&mut source, &mut detector, &mut sink, &renderer, unmirrored(None))
        .run(&mut session)
        .unwrap();

    assert_eq!(stats.gesture_frames.get("index_only"), Some(&2));
    assert_eq!(stats.gesture_frames.get("no_hand"), Some(&1));
    assert_eq!(
        session.accumulator().segments().collect::<Vec<_>>(),
        vec![(PixelPoint::new(100, 50), PixelPoint::new(50, 50))]
    );
}

#[test]
fn test_undecodable_frame_keeps_replay_in_step() {
    let dir = std::env::temp_dir().join("air_canvas_test_loop_skipped_frame");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("000.png"), b"not a png").unwrap();
    RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND).save(dir.join("001.png")).unwrap();

    // Line 1 belongs to the broken frame, line 2 to the good one
    let recording = format!("{}\nnull\n", serde_json::to_string(&pointing(0.25, 0.4)).unwrap());

    let mut source = ImageSequenceSource::open(&dir).unwrap();
    let mut detector = ReplayDetector::from_reader(Cursor::new(recording), "inline".to_string());
    let mut sink = CollectingSink::default();
    let renderer = OverlayRenderer::new(RenderStyle::default()).unwrap();
    let mut session = DrawingSession::new();

    let stats = FrameLoop::new(&mut source, &mut detector, &mut sink, &renderer, unmirrored(None))
        .run(&mut session)
        .unwrap();

    let _ = std::fs::remove_dir_all(&dir);

    assert_eq!(stats.total_frames, 1);
    assert_eq!(sink.frames.len(), 1);
    assert_eq!(stats.gesture_frames.get("no_hand"), Some(&1));
    assert_eq!(stats.gesture_frames.get("index_only"), None);
    assert!(session.accumulator().is_empty());
}

#[test]
fn test_mirroring_applies_before_detection() {
    struct LeftEdgeRecorder {
        seen: Vec<Rgb<u8>>,
    }

    impl HandLandmarkDetector for LeftEdgeRecorder {
        fn detect(&mut self, frame: &RawFrame) -> DetectionResult<Option<HandLandmarks>> {
            self.seen.push(*frame.image.get_pixel(0, 0));
            Ok(None)
        }

        fn is_initialized(&self) -> bool {
            true
        }

        fn model_info(&self) -> String {
            "left edge recorder".to_string()
        }
    }

    struct MarkedSource {
        sent: bool,
    }

    impl FrameSource for MarkedSource {
        fn next_frame(&mut self) -> CaptureResult<Option<RawFrame>> {
            if self.sent {
                return Ok(None);
            }
            self.sent = true;
            let mut image = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
            image.put_pixel(WIDTH - 1, 0, Rgb([9, 9, 9]));
            Ok(Some(RawFrame::new(image)))
        }

        fn describe(&self) -> String {
            "marked".to_string()
        }
    }

    let mut source = MarkedSource { sent: false };
    let mut detector = LeftEdgeRecorder { seen: Vec::new() };
    let mut sink = CollectingSink::default();
    let renderer = OverlayRenderer::new(RenderStyle::default()).unwrap();
    let mut session = DrawingSession::new();

    FrameLoop::new(
        &mut source,
        &mut detector,
        &mut sink,
        &renderer,
        LoopOptions {
            mirror_input: true,
            max_frames: None,
        },
    )
    .run(&mut session)
    .unwrap();

    assert_eq!(detector.seen, vec![Rgb([9, 9, 9])]);
}
