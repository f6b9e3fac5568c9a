pub mod clean_mean;
pub mod rotation;

pub use clean_mean::{clean_mean, clean_mean_translation, CleanMean};
pub use rotation::field_rotation_angle;

use crate::consts::MIN_FIELDS_FOR_ROTATION;
use crate::fields::Field;
use crate::pipeline::config::DetectConfig;
use crate::transform::Transform;

/// A recoverable problem detected while estimating one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WarningKind {
    /// No field cleared the contrast threshold; the identity was emitted.
    LowContrast,
    /// The retained field angles spread further than allowed; rotation was zeroed.
    AngleVariation { variation: f64 },
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowContrast => write!(f, "too low contrast, no field remains"),
            Self::AngleVariation { variation } => {
                write!(f, "too large variation in angle ({variation:.5})")
            }
        }
    }
}

/// Final transform of a frame plus the warning raised while computing it, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEstimate {
    pub transform: Transform,
    pub warning: Option<WarningKind>,
}

impl FrameEstimate {
    pub fn confident(transform: Transform) -> Self {
        Self {
            transform,
            warning: None,
        }
    }
}

/// Combine per-field estimates into one frame transform.
///
/// 1. Rejected estimates (`extra == -1`) are dropped; with none left the
///    identity is returned with [`WarningKind::LowContrast`].
/// 2. Translation is the cleaned mean of the field translations.
/// 3. Rotation is the negated cleaned mean of the per-field angles of the
///    residual translations about the centroid of the field centers. It is skipped
///    for grids with fewer than [`MIN_FIELDS_FOR_ROTATION`] fields and discarded
///    when the retained angles spread more than `max_angle_variation`.
/// 4. Translation is corrected for rotating about the field centroid instead of
///    the frame center.
pub fn aggregate_field_transforms(
    estimates: &[(&Field, Transform)],
    config: &DetectConfig,
) -> FrameEstimate {
    let valid: Vec<(&Field, Transform)> = estimates
        .iter()
        .filter(|(_, t)| !t.is_rejected())
        .copied()
        .collect();

    if valid.is_empty() {
        return FrameEstimate {
            transform: Transform::identity(),
            warning: Some(WarningKind::LowContrast),
        };
    }

    let n = valid.len() as f64;
    let center_x = valid.iter().map(|(f, _)| f.center_x as f64).sum::<f64>() / n;
    let center_y = valid.iter().map(|(f, _)| f.center_y as f64).sum::<f64>() / n;

    let translations: Vec<Transform> = valid.iter().map(|&(_, t)| t).collect();
    let mut t = clean_mean_translation(&translations, config.trim_fraction);
    let mut warning = None;

    if config.field_count >= MIN_FIELDS_FOR_ROTATION {
        let angles: Vec<f64> = valid
            .iter()
            .map(|&(field, estimate)| {
                let residual = estimate - t;
                field_rotation_angle(
                    field,
                    &residual,
                    (center_x, center_y),
                    config.max_shift as f64,
                )
            })
            .collect();
        if let Some(angle) = clean_mean(&angles, config.trim_fraction) {
            let variation = angle.max - angle.min;
            if variation > config.max_angle_variation {
                warning = Some(WarningKind::AngleVariation { variation });
            } else {
                t.alpha = -angle.mean;
            }
        }
    }

    // rotation was estimated about the field centroid, not the frame center
    let p_x = center_x - config.width as f64 / 2.0;
    let p_y = center_y - config.height as f64 / 2.0;
    let (sin, cos) = t.alpha.sin_cos();
    t.dx += (cos - 1.0) * p_x - sin * p_y;
    t.dy += sin * p_x + (cos - 1.0) * p_y;
    t.extra = 0;

    FrameEstimate {
        transform: t,
        warning,
    }
}
