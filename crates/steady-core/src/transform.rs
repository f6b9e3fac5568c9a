use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// `extra` value marking an estimate that must not enter aggregation.
pub const EXTRA_REJECTED: i32 = -1;

/// Rigid frame-to-frame motion estimate.
///
/// `(dx, dy)` follows the search convention `current(x, y) ≈ previous(x + dx, y + dy)`.
/// `alpha` is in radians; `zoom` is a percentage where 0 means unscaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub dx: f64,
    pub dy: f64,
    pub alpha: f64,
    pub zoom: f64,
    pub extra: i32,
}

impl Transform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Self::default()
        }
    }

    /// An estimate flagged for exclusion from aggregation.
    pub fn rejected() -> Self {
        Self {
            extra: EXTRA_REJECTED,
            ..Self::default()
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.extra == EXTRA_REJECTED
    }
}

impl Add for Transform {
    type Output = Transform;

    fn add(self, rhs: Transform) -> Transform {
        Transform {
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
            alpha: self.alpha + rhs.alpha,
            zoom: self.zoom + rhs.zoom,
            extra: self.extra,
        }
    }
}

impl Sub for Transform {
    type Output = Transform;

    fn sub(self, rhs: Transform) -> Transform {
        Transform {
            dx: self.dx - rhs.dx,
            dy: self.dy - rhs.dy,
            alpha: self.alpha - rhs.alpha,
            zoom: self.zoom - rhs.zoom,
            extra: self.extra,
        }
    }
}
