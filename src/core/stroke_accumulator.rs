// Stroke accumulation - turns per-frame drawing signals into a bounded,
// newest-first history of points and stroke breaks

use std::collections::VecDeque;

use crate::models::gesture::Gesture;
use crate::models::stroke::{PixelPoint, StrokePoint, MAX_HISTORY};

/// What a single frame did to the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameUpdate {
    pub erased: bool,
    pub break_inserted: bool,
    pub point_added: Option<PixelPoint>,
}

/// Drawing history plus the one bit of state needed to see drawing stop
pub struct StrokeAccumulator {
    history: VecDeque<StrokePoint>,
    capacity: usize,
    was_drawing_previously: bool,
}

impl Default for StrokeAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeAccumulator {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            was_drawing_previously: false,
        }
    }

    /// Advance the state machine by one frame.
    ///
    /// `fingertip` is the index fingertip in frame pixels; it is only read
    /// when `gesture` is a drawing gesture.
    pub fn apply(&mut self, gesture: Gesture, fingertip: Option<PixelPoint>) -> FrameUpdate {
        let is_drawing = gesture.is_drawing();
        let mut update = FrameUpdate::default();

        if gesture.is_erase() {
            self.clear();
            update.erased = true;
        } else if self.was_drawing_previously && !is_drawing {
            self.push_front(StrokePoint::Break);
            update.break_inserted = true;
        }

        if is_drawing {
            if let Some(point) = fingertip {
                self.push_front(StrokePoint::Point(point));
                update.point_added = Some(point);
            }
        }

        // Must stay after the edge check above
        self.was_drawing_previously = is_drawing;

        update
    }

    /// Insert at the front, evicting the oldest entry when full
    pub fn push_front(&mut self, entry: StrokePoint) {
        if self.history.len() == self.capacity {
            self.history.pop_back();
        }
        self.history.push_front(entry);
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// History entries, newest first
    pub fn history(&self) -> impl Iterator<Item = &StrokePoint> + '_ {
        self.history.iter()
    }

    /// Line segments between adjacent points, skipping any pair touching a break
    pub fn segments(&self) -> impl Iterator<Item = (PixelPoint, PixelPoint)> + '_ {
        self.history
            .iter()
            .zip(self.history.iter().skip(1))
            .filter_map(|(newer, older)| match (newer, older) {
                (StrokePoint::Point(a), StrokePoint::Point(b)) => Some((*a, *b)),
                _ => None,
            })
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn was_drawing(&self) -> bool {
        self.was_drawing_previously
    }
}
