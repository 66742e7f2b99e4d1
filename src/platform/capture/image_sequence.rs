// Replays a directory of still images as a camera feed

use std::path::{Path, PathBuf};

use super::FrameSource;
use crate::models::capture::{CaptureError, CaptureResult, RawFrame};

const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Frames are the directory's image files in file name order
pub struct ImageSequenceSource {
    directory: PathBuf,
    frames: Vec<PathBuf>,
    next: usize,
}

impl ImageSequenceSource {
    pub fn open(directory: &Path) -> CaptureResult<Self> {
        if !directory.is_dir() {
            return Err(CaptureError::SourceNotFound(directory.display().to_string()));
        }

        let mut frames = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let path = entry?.path();
            let is_frame = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if is_frame {
                frames.push(path);
            }
        }
        frames.sort();

        Ok(Self {
            directory: directory.to_path_buf(),
            frames,
            next: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> CaptureResult<Option<RawFrame>> {
        let path = match self.frames.get(self.next) {
            Some(path) => path,
            None => return Ok(None),
        };
        self.next += 1;

        let image = image::open(path).map_err(|source| CaptureError::Decode {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Some(RawFrame::new(image.to_rgb8())))
    }

    fn describe(&self) -> String {
        format!(
            "image sequence {} ({} frames)",
            self.directory.display(),
            self.frames.len()
        )
    }
}
