use std::path::{Path, PathBuf};

use super::{FrameSink, SinkControl};
use crate::models::capture::{DisplayError, DisplayResult, RawFrame};

/// Writes every presented frame as `frame_NNNNNN.png`
pub struct PngDirectorySink {
    directory: PathBuf,
    written: usize,
}

impl PngDirectorySink {
    pub fn create(directory: &Path) -> DisplayResult<Self> {
        std::fs::create_dir_all(directory)?;
        Ok(Self {
            directory: directory.to_path_buf(),
            written: 0,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.written
    }
}

impl FrameSink for PngDirectorySink {
    fn present(&mut self, frame: &RawFrame) -> DisplayResult<SinkControl> {
        let path = self.directory.join(format!("frame_{:06}.png", self.written));
        frame.image.save(&path).map_err(|source| DisplayError::Write {
            path: path.display().to_string(),
            source,
        })?;
        self.written += 1;
        Ok(SinkControl::Continue)
    }
}
