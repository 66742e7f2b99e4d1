// MediaPipe Hands integration bridge
// Backends report at most one hand per frame, already in normalized image coordinates

use crate::models::capture::RawFrame;
use crate::models::detection::DetectionResult;
use crate::models::hand::HandLandmarks;

/// Hand landmark detector
/// Implemented by the PyO3 backend, the replay backend, and `NoHandDetector`
pub trait HandLandmarkDetector {
    /// Detect the hand in a frame, `None` if no hand is visible
    fn detect(&mut self, frame: &RawFrame) -> DetectionResult<Option<HandLandmarks>>;

    /// Check if models are loaded
    fn is_initialized(&self) -> bool;

    /// Get model info
    fn model_info(&self) -> String;

    /// Called instead of `detect` for a frame the source could not deliver.
    /// Backends that hold one record per frame must step past it.
    fn skip_frame(&mut self) {}
}

// ==============================================================================
// PyO3 Implementation (Python MediaPipe)
// ==============================================================================

#[cfg(feature = "ml-pyo3")]
pub mod pyo3_backend {
    use super::*;
    use crate::models::detection::{DetectionError, DetectorConfig};
    use pyo3::prelude::*;
    use pyo3::types::{PyBytes, PyModule};

    const HANDS_SCRIPT: &str = r#"
import json
import numpy as np
import mediapipe as mp


def create_hands(static_image_mode, max_num_hands, model_complexity,
                 min_detection_confidence, min_tracking_confidence):
    return mp.solutions.hands.Hands(
        static_image_mode=static_image_mode,
        max_num_hands=max_num_hands,
        model_complexity=model_complexity,
        min_detection_confidence=min_detection_confidence,
        min_tracking_confidence=min_tracking_confidence,
    )


def process_rgb_bytes(hands, image_bytes, width, height):
    frame = np.frombuffer(image_bytes, dtype=np.uint8).reshape((height, width, 3))
    results = hands.process(frame)
    if not results.multi_hand_landmarks:
        return "null"
    label, score = "Right", 0.0
    if results.multi_handedness:
        best = results.multi_handedness[0].classification[0]
        label, score = best.label, best.score
    return json.dumps({
        "handedness": label.lower(),
        "confidence": score,
        "landmarks": [
            {"x": lm.x, "y": lm.y, "z": lm.z}
            for lm in results.multi_hand_landmarks[0].landmark
        ],
    })
"#;

    pub struct PyO3HandDetector {
        module: Py<PyModule>,
        hands: PyObject,
        config: DetectorConfig,
    }

    impl PyO3HandDetector {
        pub fn new(config: &DetectorConfig) -> DetectionResult<Self> {
            Python::with_gil(|py| {
                let module = PyModule::from_code_bound(
                    py,
                    HANDS_SCRIPT,
                    "air_canvas_hands.py",
                    "air_canvas_hands",
                )
                .map_err(|e| DetectionError::ModelLoadFailed(format!(
                    "Failed to load MediaPipe helper: {}. Make sure mediapipe and numpy are installed (pip install mediapipe)",
                    e
                )))?;

                let hands = module
                    .getattr("create_hands")
                    .and_then(|create| {
                        create.call1((
                            config.static_image_mode,
                            config.max_num_hands,
                            config.model_complexity as u8,
                            config.min_detection_confidence,
                            config.min_tracking_confidence,
                        ))
                    })
                    .map_err(|e| DetectionError::ModelLoadFailed(format!("Failed to create Hands solution: {}", e)))?;

                log::info!(
                    "PyO3HandDetector initialized: detection>={}, tracking>={}",
                    config.min_detection_confidence,
                    config.min_tracking_confidence
                );

                Ok(Self {
                    module: module.unbind(),
                    hands: hands.unbind(),
                    config: config.clone(),
                })
            })
        }
    }

    impl HandLandmarkDetector for PyO3HandDetector {
        fn detect(&mut self, frame: &RawFrame) -> DetectionResult<Option<HandLandmarks>> {
            Python::with_gil(|py| {
                let module = self.module.bind(py);
                let image_bytes = PyBytes::new_bound(py, frame.image.as_raw());

                let result_json: String = module
                    .getattr("process_rgb_bytes")
                    .and_then(|process| {
                        process.call1((self.hands.clone_ref(py), image_bytes, frame.width(), frame.height()))
                    })
                    .and_then(|result| result.extract())
                    .map_err(|e| DetectionError::InferenceFailed(format!("MediaPipe inference failed: {}", e)))?;

                serde_json::from_str(&result_json)
                    .map_err(|e| DetectionError::InferenceFailed(format!("Failed to parse landmarks: {}", e)))
            })
        }

        fn is_initialized(&self) -> bool {
            true
        }

        fn model_info(&self) -> String {
            format!(
                "PyO3 MediaPipe Hands (Python backend) - complexity: {:?}, detection: {}, tracking: {}",
                self.config.model_complexity,
                self.config.min_detection_confidence,
                self.config.min_tracking_confidence
            )
        }
    }
}

// ==============================================================================
// No-op Implementation
// ==============================================================================

/// Never sees a hand. Used when no ML backend is compiled in.
#[derive(Debug, Default)]
pub struct NoHandDetector;

impl HandLandmarkDetector for NoHandDetector {
    fn detect(&mut self, _frame: &RawFrame) -> DetectionResult<Option<HandLandmarks>> {
        Ok(None)
    }

    fn is_initialized(&self) -> bool {
        false
    }

    fn model_info(&self) -> String {
        "No hand detector (enable the 'ml-pyo3' feature or pass --landmarks)".to_string()
    }
}
