use tracing::{debug, info, warn};

use crate::error::{Result, StabilizeError};
use crate::fields::FieldGrid;
use crate::frame::{FrameGeometry, RawFrame};
use crate::io::trf::StreamHeader;
use crate::motion::{estimate_frame_motion, MotionStrategy};
use crate::stream::TransformStream;
use crate::transform::Transform;

use super::config::{Algorithm, DetectConfig, DetectOptions};
use super::types::{DetectionOutput, FrameWarning};

/// Frame-at-a-time motion detector.
///
/// Owns a copy of the previously processed frame and the growing transform
/// stream. Each call to [`MotionDetector::process_frame`] appends exactly one
/// transform, the first frame always yielding the identity.
pub struct MotionDetector {
    geometry: FrameGeometry,
    options: DetectOptions,
    config: DetectConfig,
    strategy: MotionStrategy,
    grid: Option<FieldGrid>,
    previous: Vec<u8>,
    has_previous: bool,
    transforms: TransformStream,
    warnings: Vec<FrameWarning>,
}

impl MotionDetector {
    /// Derive the configuration, lay out the field grid and allocate the
    /// previous-frame buffer. Any failure here is fatal for the run.
    pub fn new(geometry: FrameGeometry, options: &DetectOptions) -> Result<Self> {
        let options = options.normalized();
        let config = DetectConfig::new(&options, geometry.width, geometry.height)?;
        info!(
            shakiness = options.shakiness,
            accuracy = options.accuracy,
            step_size = options.step_size,
            algorithm = %options.algorithm,
            min_contrast = options.min_contrast,
            format = %geometry.format,
            "Image stabilization settings"
        );
        info!(
            field_size = config.field_size,
            max_shift = config.max_shift,
            "Field size and maximal translation"
        );

        let grid = match config.algorithm {
            Algorithm::FieldBased => {
                let grid = FieldGrid::build(
                    config.width,
                    config.height,
                    config.max_shift,
                    config.step_size,
                    config.field_size,
                )?;
                info!(
                    used = config.max_fields,
                    total = grid.len(),
                    "Measurement fields"
                );
                Some(grid)
            }
            Algorithm::GlobalBruteForce => None,
        };

        let strategy = MotionStrategy::resolve(&config, geometry.format);
        let previous = allocate_frame_buffer(geometry.frame_size())?;

        Ok(Self {
            geometry,
            options,
            config,
            strategy,
            grid,
            previous,
            has_previous: false,
            transforms: TransformStream::new(),
            warnings: Vec::new(),
        })
    }

    /// Estimate the motion of `data` relative to the previous frame and append it.
    pub fn process_frame(&mut self, data: &[u8]) -> Result<Transform> {
        let frame = RawFrame::new(data, self.geometry)?;
        self.process(&frame)
    }

    /// Like [`MotionDetector::process_frame`] for an already validated frame.
    ///
    /// A frame of another layout or size is rejected without touching any state.
    pub fn process(&mut self, frame: &RawFrame) -> Result<Transform> {
        let geometry = frame.geometry();
        if geometry.format != self.geometry.format {
            return Err(StabilizeError::UnsupportedPixelFormat(format!(
                "{} (detector configured for {})",
                geometry.format, self.geometry.format
            )));
        }
        if geometry != self.geometry {
            return Err(StabilizeError::InvalidDimensions {
                width: geometry.width,
                height: geometry.height,
            });
        }

        let index = self.transforms.len();
        let transform = if self.has_previous {
            let estimate = {
                let previous = RawFrame::new(&self.previous, self.geometry)?;
                estimate_frame_motion(
                    &frame.search_plane(),
                    &previous.search_plane(),
                    &self.config,
                    &self.strategy,
                    self.grid.as_ref(),
                )?
            };
            if let Some(kind) = estimate.warning {
                warn!(frame = index, "{kind}");
                self.warnings.push(FrameWarning { frame: index, kind });
            }
            estimate.transform
        } else {
            Transform::identity()
        };

        self.previous.copy_from_slice(frame.data());
        self.has_previous = true;
        self.transforms.push(transform);
        debug!(
            frame = index,
            dx = transform.dx,
            dy = transform.dy,
            alpha = transform.alpha,
            "Frame transform"
        );
        Ok(transform)
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// The normalized options this detector runs with.
    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    pub fn strategy(&self) -> &MotionStrategy {
        &self.strategy
    }

    /// Field grid, present for the field-based algorithm only.
    pub fn grid(&self) -> Option<&FieldGrid> {
        self.grid.as_ref()
    }

    pub fn transforms(&self) -> &TransformStream {
        &self.transforms
    }

    pub fn warnings(&self) -> &[FrameWarning] {
        &self.warnings
    }

    pub fn frames_processed(&self) -> usize {
        self.transforms.len()
    }

    /// End the run, releasing the frame buffer.
    pub fn finish(self) -> DetectionOutput {
        DetectionOutput {
            header: StreamHeader::from(&self.options),
            config: self.config,
            transforms: self.transforms,
            warnings: self.warnings,
        }
    }
}

fn allocate_frame_buffer(size: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|e| StabilizeError::Allocation(format!("frame buffer of {size} bytes: {e}")))?;
    buffer.resize(size, 0);
    Ok(buffer)
}
