// Data models for hand gesture classification

use image::Rgb;
use serde::{Deserialize, Serialize};

/// Straight/bent state of the four classified fingers for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    pub fn new(index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self {
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub fn all_straight(&self) -> bool {
        self.index && self.middle && self.ring && self.pinky
    }

    pub fn all_bent(&self) -> bool {
        !self.index && !self.middle && !self.ring && !self.pinky
    }

    pub fn index_only(&self) -> bool {
        self.index && !self.middle && !self.ring && !self.pinky
    }
}

/// Gesture label derived once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// Open palm: erases the canvas
    AllStraight,
    /// Fist: idle
    AllBent,
    /// Pointing: the only drawing gesture
    IndexOnly,
    /// Pinky up with any other combination not matched above: stop drawing
    PinkyStraightOther,
    Unknown,
    NoHand,
}

impl Gesture {
    pub const ALL: [Gesture; 6] = [
        Gesture::AllStraight,
        Gesture::AllBent,
        Gesture::IndexOnly,
        Gesture::PinkyStraightOther,
        Gesture::Unknown,
        Gesture::NoHand,
    ];

    pub fn is_drawing(&self) -> bool {
        matches!(self, Gesture::IndexOnly)
    }

    pub fn is_erase(&self) -> bool {
        matches!(self, Gesture::AllStraight)
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            Gesture::AllStraight => "ERASE: CLEARING CANVAS",
            Gesture::AllBent => "NO ACTION: FIST CLENCHED",
            Gesture::IndexOnly => "DRAWING: INDEX ONLY OPEN",
            Gesture::PinkyStraightOther => "STOP DRAWING: pinky OPEN",
            Gesture::Unknown => "UNKNOWN GESTURE: STOPPED",
            Gesture::NoHand => "NO HAND DETECTED",
        }
    }

    pub fn status_color(&self) -> Rgb<u8> {
        match self {
            Gesture::AllStraight => Rgb([255, 0, 0]),
            Gesture::AllBent => Rgb([128, 128, 128]),
            Gesture::IndexOnly => Rgb([0, 255, 0]),
            Gesture::PinkyStraightOther => Rgb([0, 165, 255]),
            Gesture::Unknown => Rgb([0, 255, 255]),
            Gesture::NoHand => Rgb([255, 255, 255]),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::AllStraight => "all_straight",
            Gesture::AllBent => "all_bent",
            Gesture::IndexOnly => "index_only",
            Gesture::PinkyStraightOther => "pinky_straight_other",
            Gesture::Unknown => "unknown",
            Gesture::NoHand => "no_hand",
        }
    }
}
