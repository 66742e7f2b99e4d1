// Data structures for camera frames

use image::RgbImage;

/// A captured frame. Pixels are RGB8, row-major, origin top-left.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub image: RgbImage,
}

impl RawFrame {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Mirror the frame left-to-right in place
    pub fn mirror(&mut self) {
        image::imageops::flip_horizontal_in_place(&mut self.image);
    }
}

/// Error types for frame capture operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Failed to decode frame {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Error types for frame display operations
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Failed to write frame {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Display failed: {0}")]
    DisplayFailed(String),
}

pub type DisplayResult<T> = Result<T, DisplayError>;
