use rayon::prelude::*;

use crate::aggregate::{aggregate_field_transforms, FrameEstimate};
use crate::consts::{PARALLEL_FIELD_THRESHOLD, RGB_COARSE_STEP};
use crate::error::{Result, StabilizeError};
use crate::fields::{select_by_contrast, Field, FieldGrid};
use crate::frame::{PixelFormat, Plane};
use crate::pipeline::config::{Algorithm, DetectConfig};
use crate::transform::Transform;

use super::brute_force::search_whole_frame;
use super::field_search::{search_field, SearchParams};

/// Which samples the search compares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleLayout {
    /// Single-channel luma plane of a YUV frame.
    Luma,
    /// Packed 3-channel RGB.
    Rgb,
}

impl SampleLayout {
    pub fn for_format(format: PixelFormat) -> Self {
        match format {
            PixelFormat::Rgb24 => Self::Rgb,
            PixelFormat::Yuv420p | PixelFormat::Yuv422p => Self::Luma,
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            Self::Luma => 1,
            Self::Rgb => 3,
        }
    }
}

/// Search strategy, resolved once per run from the algorithm and pixel layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionStrategy {
    BruteForce { layout: SampleLayout },
    Fields {
        layout: SampleLayout,
        search: SearchParams,
    },
}

impl MotionStrategy {
    pub fn resolve(config: &DetectConfig, format: PixelFormat) -> Self {
        let layout = SampleLayout::for_format(format);
        match config.algorithm {
            Algorithm::GlobalBruteForce => Self::BruteForce { layout },
            Algorithm::FieldBased => {
                let coarse_step = match layout {
                    SampleLayout::Luma => config.step_size,
                    SampleLayout::Rgb => RGB_COARSE_STEP,
                };
                Self::Fields {
                    layout,
                    search: SearchParams {
                        max_shift: config.max_shift,
                        coarse_step,
                        allow_max_shift: config.allow_max_shift,
                    },
                }
            }
        }
    }

    pub fn layout(&self) -> SampleLayout {
        match self {
            Self::BruteForce { layout } | Self::Fields { layout, .. } => *layout,
        }
    }
}

/// Search every selected field, returning `(field_index, transform)` in selection order.
pub fn estimate_fields(
    current: &Plane,
    previous: &Plane,
    grid: &FieldGrid,
    selected: &[usize],
    params: &SearchParams,
) -> Result<Vec<(usize, Transform)>> {
    let search = |&index: &usize| -> Result<(usize, Transform)> {
        let field = grid.get(index).ok_or(StabilizeError::FrameIndexOutOfRange {
            index,
            total: grid.len(),
        })?;
        Ok((index, search_field(current, previous, field, params)?))
    };

    if selected.len() >= PARALLEL_FIELD_THRESHOLD {
        selected.par_iter().map(search).collect()
    } else {
        selected.iter().map(search).collect()
    }
}

/// Estimate the motion between two consecutive frames with the resolved strategy.
pub fn estimate_frame_motion(
    current: &Plane,
    previous: &Plane,
    config: &DetectConfig,
    strategy: &MotionStrategy,
    grid: Option<&FieldGrid>,
) -> Result<FrameEstimate> {
    match strategy {
        MotionStrategy::BruteForce { .. } => {
            let transform = search_whole_frame(current, previous, config.max_shift)?;
            Ok(FrameEstimate::confident(transform))
        }
        MotionStrategy::Fields { search, .. } => {
            let grid = grid.ok_or_else(|| {
                StabilizeError::InvalidConfig("field-based search needs a field grid".into())
            })?;
            let selected =
                select_by_contrast(current, grid, config.contrast_threshold, config.max_fields)?;
            let estimates = estimate_fields(current, previous, grid, &selected, search)?;
            let pairs: Vec<(&Field, Transform)> = estimates
                .iter()
                .filter_map(|&(index, t)| grid.get(index).map(|field| (field, t)))
                .collect();
            Ok(aggregate_field_transforms(&pairs, config))
        }
    }
}
