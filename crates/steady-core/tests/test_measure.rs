mod common;

use approx::assert_abs_diff_eq;

use steady_core::error::StabilizeError;
use steady_core::fields::Field;
use steady_core::frame::Plane;
use steady_core::measure::{field_contrast, field_sad, window_contrast, window_sad, windowed_sad};

// ---------------------------------------------------------------------------
// Contrast
// ---------------------------------------------------------------------------

#[test]
fn test_flat_field_has_zero_contrast() {
    for value in [0u8, 17, 128, 255] {
        let data = vec![value; 32 * 32];
        let plane = Plane::new(&data, 32, 32, 1).unwrap();
        let field = Field {
            center_x: 16,
            center_y: 16,
            size: 10,
        };
        assert_eq!(field_contrast(&plane, &field).unwrap(), 0.0);
    }
}

#[test]
fn test_contrast_full_range() {
    let mut data = vec![0u8; 16];
    data[5] = 255;
    let plane = Plane::new(&data, 4, 4, 1).unwrap();
    let window = plane.window(0, 0, 4, 4).unwrap();
    assert_abs_diff_eq!(window_contrast(&window, 0), 255.0 / 255.1, epsilon = 1e-12);
}

#[test]
fn test_contrast_grows_with_spread() {
    let contrast_of = |low: u8, high: u8| {
        let data: Vec<u8> = (0..64).map(|i| if i % 2 == 0 { low } else { high }).collect();
        let plane = Plane::new(&data, 8, 8, 1).unwrap();
        window_contrast(&plane.window(0, 0, 8, 8).unwrap(), 0)
    };
    let narrow = contrast_of(120, 136);
    let medium = contrast_of(100, 156);
    let wide = contrast_of(60, 196);
    assert!(narrow > 0.0);
    assert!(narrow < medium);
    assert!(medium < wide);
}

#[test]
fn test_rgb_contrast_averages_channels() {
    // red varies fully, green and blue are flat
    let mut data = Vec::new();
    for i in 0..16 {
        data.extend_from_slice(&[if i == 0 { 255 } else { 0 }, 90, 90]);
    }
    let plane = Plane::new(&data, 4, 4, 3).unwrap();
    let field = Field {
        center_x: 2,
        center_y: 2,
        size: 4,
    };
    let expected = (255.0 / 255.1) / 3.0;
    assert_abs_diff_eq!(field_contrast(&plane, &field).unwrap(), expected, epsilon = 1e-12);
}

#[test]
fn test_field_contrast_outside_plane() {
    let data = vec![0u8; 64];
    let plane = Plane::new(&data, 8, 8, 1).unwrap();
    let field = Field {
        center_x: 7,
        center_y: 4,
        size: 6,
    };
    assert!(matches!(
        field_contrast(&plane, &field),
        Err(StabilizeError::WindowOutOfBounds { .. })
    ));
}

// ---------------------------------------------------------------------------
// Sum of absolute differences
// ---------------------------------------------------------------------------

#[test]
fn test_window_sad_is_mean_difference() {
    let a = vec![10u8; 9];
    let b = vec![13u8; 9];
    let pa = Plane::new(&a, 3, 3, 1).unwrap();
    let pb = Plane::new(&b, 3, 3, 1).unwrap();
    let sad = window_sad(&pa.window(0, 0, 3, 3).unwrap(), &pb.window(0, 0, 3, 3).unwrap());
    assert_abs_diff_eq!(sad, 3.0, epsilon = 1e-12);
}

#[test]
fn test_windowed_sad_zero_at_true_shift() {
    let (w, h) = (48, 40);
    let current = common::textured_luma(w, h, 0, 0);
    let previous = common::textured_luma(w, h, 3, -2);
    let cur = Plane::new(&current, w, h, 1).unwrap();
    let prev = Plane::new(&previous, w, h, 1).unwrap();
    assert_eq!(windowed_sad(&cur, &prev, 3, -2).unwrap(), 0.0);
    assert!(windowed_sad(&cur, &prev, 0, 0).unwrap() > 0.0);
    assert!(windowed_sad(&cur, &prev, -3, 2).unwrap() > 0.0);
}

#[test]
fn test_windowed_sad_rejects_mismatched_planes() {
    let a = vec![0u8; 16];
    let b = vec![0u8; 20];
    let pa = Plane::new(&a, 4, 4, 1).unwrap();
    let pb = Plane::new(&b, 5, 4, 1).unwrap();
    assert!(matches!(
        windowed_sad(&pa, &pb, 0, 0),
        Err(StabilizeError::InvalidDimensions { width: 5, height: 4 })
    ));
}

#[test]
fn test_field_sad_displaced_window() {
    let (w, h) = (40, 40);
    let current = common::textured_luma(w, h, 0, 0);
    let previous = common::textured_luma(w, h, -4, 5);
    let cur = Plane::new(&current, w, h, 1).unwrap();
    let prev = Plane::new(&previous, w, h, 1).unwrap();
    let field = Field {
        center_x: 20,
        center_y: 20,
        size: 8,
    };
    assert_eq!(field_sad(&cur, &prev, &field, -4, 5).unwrap(), 0.0);
    assert!(field_sad(&cur, &prev, &field, 0, 0).unwrap() > 0.0);
    assert!(field_sad(&cur, &prev, &field, 20, 0).is_err());
}
