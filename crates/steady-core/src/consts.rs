/// Minimum number of selected fields before field searches fan out over Rayon.
pub const PARALLEL_FIELD_THRESHOLD: usize = 8;

/// Minimum candidate shift count before the whole-frame search fans out over Rayon.
pub const PARALLEL_SHIFT_THRESHOLD: usize = 64;

/// Added to the Michelson denominator so a black window scores 0 instead of NaN.
pub const CONTRAST_EPSILON: f64 = 0.1;

/// Rotation is not estimated when the grid has fewer fields than this.
pub const MIN_FIELDS_FOR_ROTATION: usize = 6;

/// Fixed coarse search step for packed RGB frames (3-channel SAD is triple the cost).
pub const RGB_COARSE_STEP: usize = 2;

/// Every grid has at least this many rows and columns.
pub const MIN_GRID_DIM: usize = 3;

/// Divisor mapping shakiness onto search radius and field size:
/// shakiness 1 gives min(width, height)/40, shakiness 10 gives /4.
pub const SHAKINESS_DIVISOR: usize = 40;

/// Upper bound of the accuracy scale; `max_fields = accuracy * field_count / ACCURACY_SCALE`.
pub const ACCURACY_SCALE: usize = 15;

pub const SHAKINESS_MIN: u32 = 1;
pub const SHAKINESS_MAX: u32 = 10;
pub const ACCURACY_MIN: u32 = 1;
pub const ACCURACY_MAX: u32 = 15;

pub const DEFAULT_SHAKINESS: u32 = 4;
pub const DEFAULT_ACCURACY: u32 = 4;
pub const DEFAULT_STEP_SIZE: usize = 6;
pub const DEFAULT_MIN_CONTRAST: f64 = 0.3;

/// Largest accepted spread (radians) of the retained per-field rotation angles.
pub const DEFAULT_MAX_ANGLE_VARIATION: f64 = 1.0;

/// Fraction of samples cut from each end of the sorted list by the cleaned mean.
pub const DEFAULT_TRIM_FRACTION: f64 = 0.2;

/// Chroma value written into synthesized YUV planes (neutral grey).
pub const NEUTRAL_CHROMA: u8 = 128;

/// Extension appended to the input file name for the default record stream path.
pub const TRANSFORM_FILE_EXTENSION: &str = "trf";
