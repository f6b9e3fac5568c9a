use rayon::prelude::*;

use crate::consts::PARALLEL_SHIFT_THRESHOLD;
use crate::error::Result;
use crate::frame::Plane;
use crate::measure::windowed_sad;
use crate::transform::Transform;

/// Exhaustive whole-frame translation search over `[-max_shift, max_shift]²`.
///
/// The radius along each axis is clamped to `dim - 1` so every candidate keeps
/// a non-empty overlap. Returns the shift with the lowest mean absolute
/// difference; ties go to the candidate scanned first (x outer, y inner).
pub fn search_whole_frame(current: &Plane, previous: &Plane, max_shift: usize) -> Result<Transform> {
    let radius_x = max_shift.min(current.width().saturating_sub(1)) as isize;
    let radius_y = max_shift.min(current.height().saturating_sub(1)) as isize;
    let candidates: Vec<(isize, isize)> = (-radius_x..=radius_x)
        .flat_map(|dx| (-radius_y..=radius_y).map(move |dy| (dx, dy)))
        .collect();

    let score = |(order, &(dx, dy)): (usize, &(isize, isize))| {
        windowed_sad(current, previous, dx, dy).map(|error| (order, error))
    };
    let errors: Vec<(usize, f64)> = if candidates.len() >= PARALLEL_SHIFT_THRESHOLD {
        candidates.par_iter().enumerate().map(score).collect::<Result<_>>()?
    } else {
        candidates.iter().enumerate().map(score).collect::<Result<_>>()?
    };

    let best = errors
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    Ok(match best {
        Some((order, _)) => {
            let (dx, dy) = candidates[order];
            Transform::translation(dx as f64, dy as f64)
        }
        None => Transform::identity(),
    })
}
