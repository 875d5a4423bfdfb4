use crate::utils::Vector2;

/// Squared lengths below this are treated as the zero vector.
pub const NORMALIZE_EPSILON: f64 = 1e-20;

/// Rescales `v` to the given length.
///
/// Returns `None` for (near) zero vectors instead of dividing by zero.
///
/// # Examples
///
/// ```
/// use particle_sandbox::utils::{normalize_to, Vector2};
///
/// let v = normalize_to(Vector2::new(3.0, 4.0), 10.0).unwrap();
/// assert!((v.x - 6.0).abs() < 1e-12);
/// assert!((v.y - 8.0).abs() < 1e-12);
///
/// assert!(normalize_to(Vector2::ZERO, 1.0).is_none());
/// ```
#[inline]
pub fn normalize_to(v: Vector2, length: f64) -> Option<Vector2> {
    let length_squared = v.length_squared();
    if length_squared < NORMALIZE_EPSILON || !length_squared.is_finite() {
        return None;
    }
    Some(v * (length / length_squared.sqrt()))
}

/// Unit vector of `v`, or `fallback` if `v` is too small to normalise.
#[inline]
pub fn unit_or(v: Vector2, fallback: Vector2) -> Vector2 {
    normalize_to(v, 1.0).unwrap_or(fallback)
}

/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// # Examples
///
/// ```
/// use particle_sandbox::utils::map_range;
///
/// assert_eq!(map_range(25.0, 0.0, 50.0, 0.0, 1.0), 0.5);
/// ```
#[inline]
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if in_max == in_min {
        return out_min;
    }
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Area of a disc, used everywhere as the mass proxy.
#[inline]
pub fn disc_area(radius: f64) -> f64 {
    std::f64::consts::PI * radius * radius
}
