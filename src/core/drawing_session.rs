use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::gesture_classifier;
use crate::core::stroke_accumulator::{FrameUpdate, StrokeAccumulator};
use crate::models::gesture::Gesture;
use crate::models::hand::HandLandmarks;
use crate::models::stroke::PixelPoint;

/// Result of processing one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    pub gesture: Gesture,
    /// Fingertip position to mark, present only while drawing
    pub cursor: Option<PixelPoint>,
    pub update: FrameUpdate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub total_frames: u64,
    pub frames_with_hand: u64,
    pub gesture_frames: BTreeMap<String, u64>, // "index_only" => 120, ...
    pub strokes_completed: u64,                // Number of break markers inserted
    pub erases: u64,
    pub history_len: usize,
}

/// One drawing session: classifier and accumulator glued together per frame
pub struct DrawingSession {
    session_id: String,
    started_at: DateTime<Utc>,
    accumulator: StrokeAccumulator,
    last_gesture: Option<Gesture>,
    total_frames: u64,
    frames_with_hand: u64,
    gesture_frames: BTreeMap<Gesture, u64>,
    strokes_completed: u64,
    erases: u64,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::with_accumulator(StrokeAccumulator::new())
    }

    pub fn with_accumulator(accumulator: StrokeAccumulator) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            accumulator,
            last_gesture: None,
            total_frames: 0,
            frames_with_hand: 0,
            gesture_frames: BTreeMap::new(),
            strokes_completed: 0,
            erases: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Classify the hand (if any) and advance the drawing state by one frame
    pub fn process_frame(&mut self, hand: Option<&HandLandmarks>, width: u32, height: u32) -> FrameOutcome {
        let gesture = gesture_classifier::classify(hand);

        let fingertip = if gesture.is_drawing() {
            hand.map(|h| {
                let tip = h.index_fingertip();
                PixelPoint::from_normalized(tip.x, tip.y, width, height)
            })
        } else {
            None
        };

        let update = self.accumulator.apply(gesture, fingertip);

        if self.last_gesture != Some(gesture) {
            match hand {
                Some(h) => log::debug!("Gesture changed to {} ({} hand)", gesture.as_str(), h.handedness.as_str()),
                None => log::debug!("Gesture changed to {}", gesture.as_str()),
            }
        }
        if update.erased {
            log::debug!("Canvas erased");
            self.erases += 1;
        }
        if update.break_inserted {
            log::debug!("Stroke finished ({} entries in history)", self.accumulator.len());
            self.strokes_completed += 1;
        }

        self.total_frames += 1;
        if hand.is_some() {
            self.frames_with_hand += 1;
        }
        *self.gesture_frames.entry(gesture).or_insert(0) += 1;
        self.last_gesture = Some(gesture);

        FrameOutcome {
            gesture,
            cursor: update.point_added,
            update,
        }
    }

    pub fn accumulator(&self) -> &StrokeAccumulator {
        &self.accumulator
    }

    /// Gesture of the most recent frame, `None` before the first frame
    pub fn last_gesture(&self) -> Option<Gesture> {
        self.last_gesture
    }

    pub fn statistics(&self) -> SessionStatistics {
        SessionStatistics {
            session_id: self.session_id.clone(),
            started_at: self.started_at,
            total_frames: self.total_frames,
            frames_with_hand: self.frames_with_hand,
            gesture_frames: self
                .gesture_frames
                .iter()
                .map(|(gesture, count)| (gesture.as_str().to_string(), *count))
                .collect(),
            strokes_completed: self.strokes_completed,
            erases: self.erases,
            history_len: self.accumulator.len(),
        }
    }
}
