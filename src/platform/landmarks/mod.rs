// Hand landmark detection backends
// Provides the MediaPipe bridge and an offline replay detector

pub mod mediapipe_bridge;
pub mod replay;

pub use mediapipe_bridge::{HandLandmarkDetector, NoHandDetector};
pub use replay::ReplayDetector;

#[cfg(feature = "ml-pyo3")]
pub use mediapipe_bridge::pyo3_backend::PyO3HandDetector;
