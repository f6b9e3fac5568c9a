pub mod config;
mod engine;
mod orchestrator;
mod types;

pub use engine::MotionDetector;
pub use orchestrator::{run_detection, run_detection_reported};
pub use types::{DetectionOutput, DetectionStage, FrameWarning, ProgressReporter};
