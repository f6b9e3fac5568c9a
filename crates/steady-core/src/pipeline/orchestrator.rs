use tracing::info;

use crate::error::{Result, StabilizeError};
use crate::frame::FrameGeometry;

use super::config::DetectOptions;
use super::engine::MotionDetector;
use super::types::{DetectionOutput, DetectionStage, NoOpReporter, ProgressReporter};

/// Run motion detection over a sequence of frames.
pub fn run_detection<I, B>(
    frames: I,
    geometry: FrameGeometry,
    options: &DetectOptions,
) -> Result<DetectionOutput>
where
    I: IntoIterator<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    run_detection_reported(frames, geometry, options, &NoOpReporter)
}

/// Run motion detection with a thread-safe progress reporter.
///
/// Frames are consumed one at a time; the first error (unreadable frame, wrong
/// size or layout) stops the run and is returned.
pub fn run_detection_reported<I, B>(
    frames: I,
    geometry: FrameGeometry,
    options: &DetectOptions,
    reporter: &dyn ProgressReporter,
) -> Result<DetectionOutput>
where
    I: IntoIterator<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    let mut detector = MotionDetector::new(geometry, options)?;
    let frames = frames.into_iter();

    reporter.begin_stage(DetectionStage::Detecting, frames.size_hint().1);
    for (i, frame) in frames.enumerate() {
        let frame = frame?;
        detector.process_frame(frame.as_ref())?;
        reporter.advance(i + 1);
    }
    reporter.finish_stage();

    if detector.frames_processed() == 0 {
        return Err(StabilizeError::EmptySequence);
    }

    let output = detector.finish();
    info!(
        frames = output.transforms.len(),
        warnings = output.warnings.len(),
        "Motion detection complete"
    );
    Ok(output)
}
