use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ACCURACY_MAX, ACCURACY_MIN, ACCURACY_SCALE, DEFAULT_ACCURACY, DEFAULT_MAX_ANGLE_VARIATION,
    DEFAULT_MIN_CONTRAST, DEFAULT_SHAKINESS, DEFAULT_STEP_SIZE, DEFAULT_TRIM_FRACTION,
    SHAKINESS_DIVISOR, SHAKINESS_MAX, SHAKINESS_MIN,
};
use crate::error::{Result, StabilizeError};
use crate::fields::grid_dims;

/// Motion search algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Exhaustive whole-frame translation search.
    GlobalBruteForce,
    /// Per-field search with robust aggregation, estimating rotation too.
    #[default]
    FieldBased,
}

impl Algorithm {
    /// Map the numeric `algo` option (0 or 1).
    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Self::GlobalBruteForce),
            1 => Ok(Self::FieldBased),
            other => Err(StabilizeError::InvalidConfig(format!(
                "unknown algorithm code {other} (expected 0 or 1)"
            ))),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Self::GlobalBruteForce => 0,
            Self::FieldBased => 1,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GlobalBruteForce => write!(f, "Global Brute Force"),
            Self::FieldBased => write!(f, "Field Based"),
        }
    }
}

/// User-facing detection options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectOptions {
    /// How shaky the footage is, 1 (little) to 10 (very strong). Scales the
    /// search radius and field size.
    pub shakiness: u32,
    /// Detection accuracy, 1 (fast) to 15 (thorough), never below `shakiness`.
    /// Scales the number of fields used per frame.
    pub accuracy: u32,
    /// Coarse search step; the area around the coarse minimum is rescanned
    /// with single-pixel resolution.
    pub step_size: usize,
    pub algorithm: Algorithm,
    /// Fields whose contrast is below this are discarded (0..1).
    pub min_contrast: f64,
    /// Trust shifts that hit the search radius instead of zeroing them.
    pub allow_max_shift: bool,
    /// Largest accepted spread (radians) of per-field rotation angles.
    pub max_angle_variation: f64,
    /// Fraction of samples cut from each end by the cleaned mean (0..0.5).
    pub trim_fraction: f64,
    /// Transform file the run writes to. Recorded in the file header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PathBuf>,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            shakiness: DEFAULT_SHAKINESS,
            accuracy: DEFAULT_ACCURACY,
            step_size: DEFAULT_STEP_SIZE,
            algorithm: Algorithm::FieldBased,
            min_contrast: DEFAULT_MIN_CONTRAST,
            allow_max_shift: false,
            max_angle_variation: DEFAULT_MAX_ANGLE_VARIATION,
            trim_fraction: DEFAULT_TRIM_FRACTION,
            result: None,
        }
    }
}

impl DetectOptions {
    /// Clamp every option into its accepted range.
    pub fn normalized(&self) -> Self {
        let shakiness = self.shakiness.clamp(SHAKINESS_MIN, SHAKINESS_MAX);
        let accuracy = self.accuracy.clamp(ACCURACY_MIN, ACCURACY_MAX).max(shakiness);
        Self {
            shakiness,
            accuracy,
            step_size: self.step_size.max(1),
            algorithm: self.algorithm,
            min_contrast: self.min_contrast.clamp(0.0, 1.0),
            allow_max_shift: self.allow_max_shift,
            max_angle_variation: self.max_angle_variation.max(0.0),
            trim_fraction: self.trim_fraction.clamp(0.0, 0.49),
            result: self.result.clone(),
        }
    }

    /// Report one option as `key=value`, using the option-string key names.
    pub fn inspect(&self, key: &str) -> Option<String> {
        match key {
            "shakiness" => Some(format!("shakiness={}", self.shakiness)),
            "accuracy" => Some(format!("accuracy={}", self.accuracy)),
            "stepsize" => Some(format!("stepsize={}", self.step_size)),
            "allowmax" => Some(format!("allowmax={}", u8::from(self.allow_max_shift))),
            "algo" => Some(format!("algo={}", self.algorithm.code())),
            "mincontrast" => Some(format!("mincontrast={}", self.min_contrast)),
            "result" => self
                .result
                .as_ref()
                .map(|path| format!("result={}", path.display())),
            _ => None,
        }
    }
}

/// Per-run tunables derived once from [`DetectOptions`] and the frame size.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectConfig {
    pub width: usize,
    pub height: usize,
    pub max_shift: usize,
    pub step_size: usize,
    pub allow_max_shift: bool,
    pub algorithm: Algorithm,
    pub field_size: usize,
    pub field_rows: usize,
    pub field_cols: usize,
    pub field_count: usize,
    pub max_fields: usize,
    pub contrast_threshold: f64,
    pub max_angle_variation: f64,
    pub trim_fraction: f64,
}

impl DetectConfig {
    pub fn new(options: &DetectOptions, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StabilizeError::InvalidDimensions { width, height });
        }
        let options = options.normalized();

        // shakiness 1: min(w, h)/40, shakiness 10: min(w, h)/4
        let scaled = width.min(height) * options.shakiness as usize / SHAKINESS_DIVISOR;
        let max_shift = scaled.max(1);
        let field_size = scaled.max(1);

        let (field_rows, field_cols) = grid_dims(width, height, max_shift, field_size);
        let field_count = field_rows * field_cols;
        let max_fields = options.accuracy as usize * field_count / ACCURACY_SCALE;

        Ok(Self {
            width,
            height,
            max_shift,
            step_size: options.step_size,
            allow_max_shift: options.allow_max_shift,
            algorithm: options.algorithm,
            field_size,
            field_rows,
            field_cols,
            field_count,
            max_fields,
            contrast_threshold: options.min_contrast,
            max_angle_variation: options.max_angle_variation,
            trim_fraction: options.trim_fraction,
        })
    }
}
