// Data models for camera frames, hand landmarks, gestures, and the stroke history

pub mod capture;
pub mod detection;
pub mod gesture;
pub mod hand;
pub mod stroke;
