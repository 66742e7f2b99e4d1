// Live camera capture through OpenCV's videoio

use image::RgbImage;
use opencv::{
    core::Mat,
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};

use super::FrameSource;
use crate::models::capture::{CaptureError, CaptureResult, RawFrame};

fn capture_failed(e: opencv::Error) -> CaptureError {
    CaptureError::CaptureFailed(e.to_string())
}

pub struct OpenCvCamera {
    capture: VideoCapture,
    index: i32,
}

impl OpenCvCamera {
    pub fn open(index: i32, target_fps: u32) -> CaptureResult<Self> {
        let mut capture = VideoCapture::new(index, videoio::CAP_ANY).map_err(capture_failed)?;

        if !capture.is_opened().map_err(capture_failed)? {
            return Err(CaptureError::SourceNotFound(format!("camera {}", index)));
        }

        // Not every backend honours this; a refusal is not an error
        let _ = capture.set(videoio::CAP_PROP_FPS, target_fps as f64);

        Ok(Self { capture, index })
    }
}

impl FrameSource for OpenCvCamera {
    fn next_frame(&mut self) -> CaptureResult<Option<RawFrame>> {
        let mut bgr = Mat::default();
        if !self.capture.read(&mut bgr).map_err(capture_failed)? || bgr.empty() {
            return Ok(None);
        }

        let mut rgb = Mat::default();
        imgproc::cvt_color(&bgr, &mut rgb, imgproc::COLOR_BGR2RGB, 0).map_err(capture_failed)?;

        let width = rgb.cols() as u32;
        let height = rgb.rows() as u32;
        let data = rgb.data_bytes().map_err(capture_failed)?.to_vec();

        let image = RgbImage::from_raw(width, height, data).ok_or_else(|| {
            CaptureError::CaptureFailed(format!("unexpected buffer size for {}x{} frame", width, height))
        })?;

        Ok(Some(RawFrame::new(image)))
    }

    fn describe(&self) -> String {
        format!("camera {}", self.index)
    }
}
