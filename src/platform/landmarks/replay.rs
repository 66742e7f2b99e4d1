// Replays recorded landmarks from a JSON-lines file, one line per frame.
// A line is either `null` (no hand) or a `HandLandmarks` object.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use super::HandLandmarkDetector;
use crate::models::capture::RawFrame;
use crate::models::detection::{DetectionError, DetectionResult};
use crate::models::hand::HandLandmarks;

pub struct ReplayDetector<R: BufRead = BufReader<File>> {
    lines: Lines<R>,
    source: String,
    line_number: usize,
    exhausted: bool,
}

impl ReplayDetector<BufReader<File>> {
    pub fn open(path: &Path) -> DetectionResult<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> ReplayDetector<R> {
    pub fn from_reader(reader: R, source: String) -> Self {
        Self {
            lines: reader.lines(),
            source,
            line_number: 0,
            exhausted: false,
        }
    }

    fn parse_line(&self, line: &str) -> DetectionResult<Option<HandLandmarks>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(trimmed).map_err(|e| DetectionError::MalformedRecord {
            line: self.line_number,
            reason: e.to_string(),
        })
    }
}

impl<R: BufRead> HandLandmarkDetector for ReplayDetector<R> {
    fn detect(&mut self, _frame: &RawFrame) -> DetectionResult<Option<HandLandmarks>> {
        match self.lines.next() {
            Some(line) => {
                self.line_number += 1;
                let line = line?;
                self.parse_line(&line)
            }
            None => {
                if !self.exhausted {
                    log::warn!(
                        "Landmark replay {} ran out after {} frames, reporting no hand",
                        self.source,
                        self.line_number
                    );
                    self.exhausted = true;
                }
                Ok(None)
            }
        }
    }

    fn is_initialized(&self) -> bool {
        true
    }

    fn model_info(&self) -> String {
        format!("Landmark replay from {}", self.source)
    }

    fn skip_frame(&mut self) {
        if self.lines.next().is_some() {
            self.line_number += 1;
            log::debug!("Skipped landmark line {} of {}", self.line_number, self.source);
        }
    }
}
