// On-screen preview through OpenCV's highgui

use opencv::{core::Mat, highgui, imgproc, prelude::*};

use super::{FrameSink, SinkControl};
use crate::models::capture::{DisplayError, DisplayResult, RawFrame};

const QUIT_KEY: i32 = 'q' as i32;

fn display_failed(e: opencv::Error) -> DisplayError {
    DisplayError::DisplayFailed(e.to_string())
}

pub struct OpenCvWindow {
    title: String,
}

impl OpenCvWindow {
    pub fn open(title: &str) -> DisplayResult<Self> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE).map_err(display_failed)?;
        Ok(Self {
            title: title.to_string(),
        })
    }
}

impl FrameSink for OpenCvWindow {
    fn present(&mut self, frame: &RawFrame) -> DisplayResult<SinkControl> {
        let flat = Mat::from_slice(frame.image.as_raw()).map_err(display_failed)?;
        let rgb = flat
            .reshape(3, frame.height() as i32)
            .and_then(|view| view.try_clone())
            .map_err(display_failed)?;

        let mut bgr = Mat::default();
        imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0).map_err(display_failed)?;
        highgui::imshow(&self.title, &bgr).map_err(display_failed)?;

        let key = highgui::wait_key(5).map_err(display_failed)?;
        if key >= 0 && (key & 0xFF) == QUIT_KEY {
            return Ok(SinkControl::Quit);
        }
        Ok(SinkControl::Continue)
    }
}

impl Drop for OpenCvWindow {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.title);
    }
}
