// Data models for single-hand landmark tracking

use serde::{Deserialize, Serialize};

/// Number of landmarks MediaPipe Hands reports per hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// MediaPipe Hand Landmark indices (21 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The four fingers evaluated for gestures. The thumb is never classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn tip(self) -> HandLandmark {
        match self {
            Finger::Index => HandLandmark::IndexFingerTip,
            Finger::Middle => HandLandmark::MiddleFingerTip,
            Finger::Ring => HandLandmark::RingFingerTip,
            Finger::Pinky => HandLandmark::PinkyTip,
        }
    }

    /// Proximal interphalangeal joint
    pub fn pip(self) -> HandLandmark {
        match self {
            Finger::Index => HandLandmark::IndexFingerPip,
            Finger::Middle => HandLandmark::MiddleFingerPip,
            Finger::Ring => HandLandmark::RingFingerPip,
            Finger::Pinky => HandLandmark::PinkyPip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

/// A landmark position. x and y are normalized to [0, 1] with the origin at the
/// top-left of the frame; z is relative depth and is never used for gestures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Keypoint3D {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Keypoint3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Landmarks for the one tracked hand in a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub handedness: Handedness,
    pub landmarks: [Keypoint3D; HAND_LANDMARK_COUNT],
    #[serde(default)]
    pub confidence: f32,
}

impl HandLandmarks {
    pub fn new(handedness: Handedness, landmarks: [Keypoint3D; HAND_LANDMARK_COUNT], confidence: f32) -> Self {
        Self {
            handedness,
            landmarks,
            confidence,
        }
    }

    pub fn get(&self, landmark: HandLandmark) -> Keypoint3D {
        self.landmarks[landmark.index()]
    }

    pub fn index_fingertip(&self) -> Keypoint3D {
        self.get(HandLandmark::IndexFingerTip)
    }
}
