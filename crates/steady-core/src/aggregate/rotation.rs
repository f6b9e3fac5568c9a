use std::f64::consts::PI;

use crate::fields::Field;
use crate::transform::Transform;

/// Rotation angle implied by a field's residual translation about `center`.
///
/// Fields closer than `min_distance` (L1) to the center are too unreliable and
/// contribute 0. The result is normalized into `(-π, π]`.
pub fn field_rotation_angle(
    field: &Field,
    residual: &Transform,
    center: (f64, f64),
    min_distance: f64,
) -> f64 {
    let rx = field.center_x as f64 - center.0;
    let ry = field.center_y as f64 - center.1;
    if rx.abs() + ry.abs() < min_distance {
        return 0.0;
    }
    let a1 = ry.atan2(rx);
    let a2 = (ry + residual.dy).atan2(rx + residual.dx);
    let diff = a2 - a1;
    if diff > PI {
        diff - 2.0 * PI
    } else if diff <= -PI {
        diff + 2.0 * PI
    } else {
        diff
    }
}
