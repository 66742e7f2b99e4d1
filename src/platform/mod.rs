// External collaborators: frame sources, hand landmark detectors, and frame sinks

pub mod capture;
pub mod display;
pub mod landmarks;
