use approx::assert_relative_eq;

use crate::utils::{disc_area, map_range, normalize_to, unit_or, Vector2};

#[test]
fn test_normalize_to_target_length() {
    let v = normalize_to(Vector2::new(0.0, -2.0), 0.5).expect("non-zero vector");
    assert_relative_eq!(v.x, 0.0);
    assert_relative_eq!(v.y, -0.5);
}

#[test]
fn test_normalize_to_rejects_zero_and_nan() {
    assert!(normalize_to(Vector2::ZERO, 1.0).is_none());
    assert!(normalize_to(Vector2::new(1e-12, 0.0), 1.0).is_none());
    assert!(normalize_to(Vector2::new(f64::NAN, 1.0), 1.0).is_none());
}

#[test]
fn test_unit_or_falls_back() {
    let fallback = Vector2::new(1.0, 0.0);
    assert_eq!(unit_or(Vector2::ZERO, fallback), fallback);
    let u = unit_or(Vector2::new(3.0, 4.0), fallback);
    assert_relative_eq!(u.length(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_map_range() {
    assert_relative_eq!(map_range(0.0, 0.0, 50.0, 0.0, 255.0), 0.0);
    assert_relative_eq!(map_range(50.0, 0.0, 50.0, 0.0, 255.0), 255.0);
    // Collapsed input range maps to the lower output bound
    assert_relative_eq!(map_range(3.0, 1.0, 1.0, 7.0, 9.0), 7.0);
}

#[test]
fn test_disc_area() {
    crate::assert_float_eq(disc_area(1.0), std::f64::consts::PI, 1e-12, None);
    crate::assert_float_eq(disc_area(2.0), 4.0 * std::f64::consts::PI, 1e-12, Some("radius 2"));
}
