use crate::error::Result;
use crate::fields::Field;
use crate::frame::Plane;
use crate::measure::field_sad;
use crate::transform::Transform;

/// Search window parameters for one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub max_shift: usize,
    /// Coarse scan step; values above 1 trigger a unit-step refinement.
    pub coarse_step: usize,
    pub allow_max_shift: bool,
}

struct Best {
    dx: isize,
    dy: isize,
    error: f64,
}

impl Best {
    fn offer(&mut self, dx: isize, dy: isize, error: f64) {
        if error < self.error {
            *self = Best { dx, dy, error };
        }
    }
}

/// Coarse-to-fine translation search for a single field.
///
/// The coarse pass scans `[-max_shift, max_shift]²` with `coarse_step`; the fine
/// pass rescans the `(2 * coarse_step - 1)²` unit-step window around the coarse
/// minimum. A shift that saturates the search radius is treated as unreliable and
/// reset to 0 on that axis unless `allow_max_shift` is set.
pub fn search_field(
    current: &Plane,
    previous: &Plane,
    field: &Field,
    params: &SearchParams,
) -> Result<Transform> {
    let radius = params.max_shift as isize;
    let step = params.coarse_step.max(1);
    let mut best = Best {
        dx: 0,
        dy: 0,
        error: f64::INFINITY,
    };

    for dx in (-radius..=radius).step_by(step) {
        for dy in (-radius..=radius).step_by(step) {
            best.offer(dx, dy, field_sad(current, previous, field, dx, dy)?);
        }
    }

    if step > 1 {
        let ring = step as isize - 1;
        let (cx, cy) = (best.dx, best.dy);
        for dx in cx - ring..=cx + ring {
            for dy in cy - ring..=cy + ring {
                if dx == cx && dy == cy {
                    continue;
                }
                best.offer(dx, dy, field_sad(current, previous, field, dx, dy)?);
            }
        }
    }

    let (mut dx, mut dy) = (best.dx, best.dy);
    if !params.allow_max_shift {
        if dx.unsigned_abs() >= params.max_shift {
            dx = 0;
        }
        if dy.unsigned_abs() >= params.max_shift {
            dy = 0;
        }
    }
    Ok(Transform::translation(dx as f64, dy as f64))
}
