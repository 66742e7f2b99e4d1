pub mod config;

// Gesture-driven drawing state machine
pub mod gesture_classifier;
pub mod stroke_accumulator;
pub mod drawing_session;

// Rendering and the per-frame loop
pub mod overlay_renderer;
pub mod frame_loop;
