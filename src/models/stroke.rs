// Data models for the drawing history

use serde::{Deserialize, Serialize};

/// Maximum number of entries (points and breaks) kept in the stroke history
pub const MAX_HISTORY: usize = 1024;

/// A position in frame pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Scale a normalized coordinate to frame pixels, truncating toward zero
    pub fn from_normalized(x: f32, y: f32, width: u32, height: u32) -> Self {
        Self {
            x: (x * width as f32) as i32,
            y: (y * height as f32) as i32,
        }
    }
}

/// One history entry: a drawn point, or a discontinuity between strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokePoint {
    Point(PixelPoint),
    Break,
}

impl StrokePoint {
    pub fn point(&self) -> Option<PixelPoint> {
        match self {
            StrokePoint::Point(p) => Some(*p),
            StrokePoint::Break => None,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, StrokePoint::Break)
    }
}

impl From<PixelPoint> for StrokePoint {
    fn from(point: PixelPoint) -> Self {
        StrokePoint::Point(point)
    }
}
