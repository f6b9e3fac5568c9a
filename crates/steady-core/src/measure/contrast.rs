use crate::consts::CONTRAST_EPSILON;
use crate::error::Result;
use crate::fields::Field;
use crate::frame::{Plane, Window};

/// Michelson contrast `(max - min) / (max + min + ε)` of one channel of a window.
pub fn window_contrast(window: &Window, channel: usize) -> f64 {
    let channels = window.channels();
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for row in window.rows() {
        for &v in row.iter().skip(channel).step_by(channels) {
            min = min.min(v);
            max = max.max(v);
        }
    }
    (max as f64 - min as f64) / (max as f64 + min as f64 + CONTRAST_EPSILON)
}

/// Contrast of a field window. Packed RGB planes average the three per-channel contrasts.
pub fn field_contrast(plane: &Plane, field: &Field) -> Result<f64> {
    let (x, y) = field.origin();
    let window = plane.window_checked(x, y, field.size, field.size)?;
    let channels = plane.channels();
    let total: f64 = (0..channels).map(|c| window_contrast(&window, c)).sum();
    Ok(total / channels as f64)
}
