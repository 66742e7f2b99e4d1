// Frame sinks - where rendered frames go

use crate::models::capture::{DisplayResult, RawFrame};

pub mod png_directory;

pub use png_directory::PngDirectorySink;

#[cfg(feature = "camera-opencv")]
pub mod opencv_window;

#[cfg(feature = "camera-opencv")]
pub use opencv_window::OpenCvWindow;

/// Whether the frame loop should keep going after a frame is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkControl {
    Continue,
    Quit,
}

pub trait FrameSink {
    fn present(&mut self, frame: &RawFrame) -> DisplayResult<SinkControl>;
}
