use crate::aggregate::WarningKind;
use crate::io::trf::StreamHeader;
use crate::stream::TransformStream;

use super::config::DetectConfig;

/// Detection stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectionStage {
    Reading,
    Detecting,
    Writing,
}

impl std::fmt::Display for DetectionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading frames"),
            Self::Detecting => write!(f, "Detecting motion"),
            Self::Writing => write!(f, "Writing transforms"),
        }
    }
}

/// A recoverable warning raised for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameWarning {
    pub frame: usize,
    pub kind: WarningKind,
}

impl std::fmt::Display for FrameWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame {}: {}", self.frame, self.kind)
    }
}

/// Everything a finished detection run produced.
#[derive(Clone, Debug)]
pub struct DetectionOutput {
    pub header: StreamHeader,
    pub config: DetectConfig,
    pub transforms: TransformStream,
    pub warnings: Vec<FrameWarning>,
}

/// Thread-safe progress reporting for a detection run.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the frame count, if known.
    fn begin_stage(&self, _stage: DetectionStage, _total_items: Option<usize>) {}

    /// One more work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_detection` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
