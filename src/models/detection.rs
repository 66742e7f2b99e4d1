// Hand landmark detector configuration and errors

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub min_detection_confidence: f32, // Minimum confidence for palm detection (default: 0.7)
    pub min_tracking_confidence: f32,  // Minimum confidence to keep tracking between frames (default: 0.5)
    pub max_num_hands: u32,            // Only one hand is ever tracked
    pub static_image_mode: bool,       // Run detection on every frame instead of tracking
    pub model_complexity: ModelComplexity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelComplexity {
    Lite = 0, // Fastest, less accurate
    Full = 1, // Balanced
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
            max_num_hands: 1,
            static_image_mode: false,
            model_complexity: ModelComplexity::Full,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Model loading failed: {0}")]
    ModelLoadFailed(String),

    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Malformed landmark record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DetectionResult<T> = Result<T, DetectionError>;
