// Gesture classification from per-finger straightness

use crate::models::gesture::{FingerStates, Gesture};
use crate::models::hand::{Finger, HandLandmarks};

/// A finger is straight when its tip sits above its PIP joint in image space.
///
/// Only meaningful for an upright hand: a hand pointing down or sideways is
/// misclassified.
pub fn is_finger_straight(hand: &HandLandmarks, finger: Finger) -> bool {
    hand.get(finger.tip()).y < hand.get(finger.pip()).y
}

impl FingerStates {
    pub fn from_landmarks(hand: &HandLandmarks) -> Self {
        Self {
            index: is_finger_straight(hand, Finger::Index),
            middle: is_finger_straight(hand, Finger::Middle),
            ring: is_finger_straight(hand, Finger::Ring),
            pinky: is_finger_straight(hand, Finger::Pinky),
        }
    }
}

/// Map finger states to a gesture. First match wins.
pub fn classify_fingers(fingers: FingerStates) -> Gesture {
    if fingers.all_straight() {
        Gesture::AllStraight
    } else if fingers.all_bent() {
        Gesture::AllBent
    } else if fingers.index_only() {
        Gesture::IndexOnly
    } else if fingers.pinky {
        Gesture::PinkyStraightOther
    } else {
        Gesture::Unknown
    }
}

/// Classify the tracked hand, or `NoHand` when nothing was detected
pub fn classify(hand: Option<&HandLandmarks>) -> Gesture {
    match hand {
        Some(hand) => classify_fingers(FingerStates::from_landmarks(hand)),
        None => Gesture::NoHand,
    }
}
