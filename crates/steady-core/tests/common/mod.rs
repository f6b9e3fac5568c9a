#![allow(dead_code)]

use steady_core::frame::{FrameGeometry, PixelFormat};

/// Wave texture with per-pixel hash noise.
///
/// Every nonzero shift leaves a residual error, so exhaustive searches find
/// the true shift as the only zero. The noise breaks coarse-to-fine searches
/// with a step above 1; use [`smooth_value`] there. Defined for any integer
/// coordinate so shifted copies stay consistent at the edges.
pub fn texture_value(x: i64, y: i64) -> u8 {
    let (fx, fy) = (x as f64, y as f64);
    let smooth = 128.0
        + 55.0 * (0.31 * fx + 0.12 * fy).sin()
        + 45.0 * (0.09 * fx - 0.27 * fy + 1.3).sin();
    let hash = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)).rem_euclid(11) - 5;
    (smooth + hash as f64).round().clamp(0.0, 255.0) as u8
}

/// Noise-free texture, smooth at pixel scale.
///
/// Three waves with unrelated directions keep it from repeating within the
/// search radius of the tests.
pub fn smooth_value(x: i64, y: i64) -> u8 {
    let (fx, fy) = (x as f64, y as f64);
    let value = 128.0
        + 50.0 * (0.31 * fx + 0.12 * fy).sin()
        + 40.0 * (0.09 * fx - 0.27 * fy + 1.3).sin()
        + 25.0 * (0.19 * fx + 0.23 * fy + 0.4).sin();
    value.round().clamp(0.0, 255.0) as u8
}

fn sample_luma(width: usize, height: usize, value: impl Fn(i64, i64) -> u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            data.push(value(x, y));
        }
    }
    data
}

fn sample_rgb(width: usize, height: usize, value: impl Fn(i64, i64) -> u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let v = value(x, y);
            data.extend_from_slice(&[v, v.saturating_add(10), v.saturating_sub(10)]);
        }
    }
    data
}

/// Luma plane sampling the texture at `(x - dx, y - dy)`.
///
/// A frame built with `(0, 0)` and one built with `(dx, dy)` satisfy
/// `current(x, y) == previous(x + dx, y + dy)`.
pub fn textured_luma(width: usize, height: usize, dx: i64, dy: i64) -> Vec<u8> {
    sample_luma(width, height, |x, y| texture_value(x - dx, y - dy))
}

/// Packed RGB frame with the texture in every channel, slightly offset per channel.
pub fn textured_rgb(width: usize, height: usize, dx: i64, dy: i64) -> Vec<u8> {
    sample_rgb(width, height, |x, y| texture_value(x - dx, y - dy))
}

/// Like [`textured_luma`] with the noise-free texture.
pub fn smooth_luma(width: usize, height: usize, dx: i64, dy: i64) -> Vec<u8> {
    sample_luma(width, height, |x, y| smooth_value(x - dx, y - dy))
}

/// Like [`textured_rgb`] with the noise-free texture.
pub fn smooth_rgb(width: usize, height: usize, dx: i64, dy: i64) -> Vec<u8> {
    sample_rgb(width, height, |x, y| smooth_value(x - dx, y - dy))
}

/// Dark luma plane with one Gaussian bump centred at `(cx, cy)`.
///
/// The error between two bumps grows with their distance, so a coarse scan
/// always lands next to the true shift.
pub fn bump_luma(width: usize, height: usize, cx: f64, cy: f64) -> Vec<u8> {
    const SIGMA: f64 = 3.5;
    sample_luma(width, height, |x, y| {
        let r2 = (x as f64 - cx).powi(2) + (y as f64 - cy).powi(2);
        (30.0 + 200.0 * (-r2 / (2.0 * SIGMA * SIGMA)).exp()).round() as u8
    })
}

/// Complete YUV 4:2:0 frame: the given luma plane followed by neutral chroma.
pub fn yuv420_frame(width: usize, height: usize, luma: &[u8]) -> Vec<u8> {
    let mut data = luma.to_vec();
    data.resize(PixelFormat::Yuv420p.frame_size(width, height), 128);
    data
}

/// Uniform luma plane with one bright square block.
pub fn block_luma(width: usize, height: usize, bx: usize, by: usize, size: usize) -> Vec<u8> {
    let mut data = vec![40u8; width * height];
    for y in by..by + size {
        for x in bx..bx + size {
            data[y * width + x] = 220;
        }
    }
    data
}

pub fn yuv420(width: usize, height: usize) -> FrameGeometry {
    FrameGeometry::new(width, height, PixelFormat::Yuv420p).unwrap()
}
