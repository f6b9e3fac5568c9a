use crate::error::{Result, StabilizeError};
use crate::fields::Field;
use crate::frame::{Plane, Window};

/// Mean absolute per-sample difference between two equally sized windows.
pub fn window_sad(a: &Window, b: &Window) -> f64 {
    debug_assert_eq!(a.sample_count(), b.sample_count());
    let sum: u64 = a
        .rows()
        .zip(b.rows())
        .map(|(ra, rb)| {
            ra.iter()
                .zip(rb)
                .map(|(&p, &q)| p.abs_diff(q) as u64)
                .sum::<u64>()
        })
        .sum();
    sum as f64 / a.sample_count() as f64
}

/// Compare two whole planes with `b` displaced by `(dx, dy)`.
///
/// Only the overlapping region is compared (`width - |dx|` by `height - |dy|`),
/// pairing `a(x, y)` with `b(x + dx, y + dy)`.
pub fn windowed_sad(a: &Plane, b: &Plane, dx: isize, dy: isize) -> Result<f64> {
    if a.width() != b.width() || a.height() != b.height() || a.channels() != b.channels() {
        return Err(StabilizeError::InvalidDimensions {
            width: b.width(),
            height: b.height(),
        });
    }
    let overlap_w = a.width().saturating_sub(dx.unsigned_abs());
    let overlap_h = a.height().saturating_sub(dy.unsigned_abs());

    let wa = a.window_checked((-dx).max(0), (-dy).max(0), overlap_w, overlap_h)?;
    let wb = b.window_checked(dx.max(0), dy.max(0), overlap_w, overlap_h)?;
    Ok(window_sad(&wa, &wb))
}

/// Compare the field window of `a` with the same window of `b` displaced by `(dx, dy)`.
pub fn field_sad(a: &Plane, b: &Plane, field: &Field, dx: isize, dy: isize) -> Result<f64> {
    let (x, y) = field.origin();
    let wa = a.window_checked(x, y, field.size, field.size)?;
    let wb = b.window_checked(x + dx, y + dy, field.size, field.size)?;
    Ok(window_sad(&wa, &wb))
}
