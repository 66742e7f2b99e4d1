// Frame sources
// Each source yields RGB frames one at a time; `Ok(None)` means the source is exhausted

use crate::models::capture::{CaptureResult, RawFrame};

pub mod image_sequence;

pub use image_sequence::ImageSequenceSource;

#[cfg(feature = "camera-opencv")]
pub mod opencv_camera;

#[cfg(feature = "camera-opencv")]
pub use opencv_camera::OpenCvCamera;

pub trait FrameSource {
    /// Block until the next frame is available
    fn next_frame(&mut self) -> CaptureResult<Option<RawFrame>>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}
