use crate::models::{LineSegment, Particle};
use crate::utils::{normalize_to, unit_or, Vector2};

/// Material response shared by every contact in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResponse {
    /// Mass per unit area.
    pub density: f64,
    /// 1 is perfectly elastic, 0 perfectly inelastic.
    pub restitution: f64,
    /// Fraction of every impulse that is thrown away.
    pub energy_loss: f64,
    /// Extra clearance left after pushing a particle out of a static line.
    pub overlap_gap: f64,
}

impl CollisionResponse {
    fn retained(&self) -> f64 {
        1.0 - self.energy_loss
    }
}

/// Separates two overlapping particles and exchanges an impulse along the contact normal.
///
/// Positional correction splits the overlap by area: the larger particle moves less.
/// The impulse uses `area * density` as mass and is computed from the corrected positions.
/// Particles at the exact same position are pushed apart along the x axis.
///
/// Returns `false` (leaving both untouched) when the particles do not overlap.
///
/// # Examples
///
/// ```
/// use particle_sandbox::interactions::{resolve_particle_pair, CollisionResponse};
/// use particle_sandbox::models::Particle;
/// use particle_sandbox::utils::Vector2;
///
/// let response = CollisionResponse { density: 1.0, restitution: 0.7, energy_loss: 0.0, overlap_gap: 0.01 };
/// let mut a = Particle::new(Vector2::new(0.0, 0.0), 1.0).unwrap();
/// let mut b = Particle::new(Vector2::new(1.5, 0.0), 1.0).unwrap();
///
/// assert!(resolve_particle_pair(&mut a, &mut b, &response));
/// assert!((a.position.x + 0.25).abs() < 1e-12);
/// assert!((b.position.x - 1.75).abs() < 1e-12);
/// assert_eq!(a.velocity, Vector2::ZERO);
/// ```
pub fn resolve_particle_pair(a: &mut Particle, b: &mut Particle, response: &CollisionResponse) -> bool {
    let radii_sum = a.radius + b.radius;
    let delta = a.position - b.position;

    // Broad phase
    if delta.x.abs() >= radii_sum || delta.y.abs() >= radii_sum {
        return false;
    }

    // Narrow phase
    let distance_squared = delta.length_squared();
    if distance_squared > radii_sum * radii_sum {
        return false;
    }

    let overlap = radii_sum - distance_squared.sqrt();
    if overlap <= 0.0 {
        return false;
    }

    let area_a = a.area();
    let area_b = b.area();
    let total_area = area_a + area_b;
    let factor_a = area_a / total_area;
    let factor_b = area_b / total_area;

    let push = normalize_to(delta, overlap).unwrap_or(Vector2::new(overlap, 0.0));
    a.position += push * factor_b;
    b.position -= push * factor_a;

    let normal = unit_or(a.position - b.position, Vector2::X);
    let relative_velocity = (b.velocity - a.velocity).dot(normal);

    let mass_a = area_a * response.density;
    let mass_b = area_b * response.density;
    let impulse = -((1.0 + response.restitution) * relative_velocity) / (1.0 / mass_a + 1.0 / mass_b);

    a.velocity -= normal * (impulse / mass_a * response.retained());
    b.velocity += normal * (impulse / mass_b * response.retained());

    true
}

/// Pushes a particle out of a static segment and bounces it.
///
/// Only the part of the line between its endpoints collides. The particle is pushed out
/// on whichever side its centre is, to `radius + overlap_gap` from the line. The velocity
/// is reflected only while it still points into the line:
/// `v -= 2·(v·n)·n·restitution·(1 − energy_loss)`.
///
/// # Examples
///
/// ```
/// use particle_sandbox::interactions::{resolve_static_line, CollisionResponse};
/// use particle_sandbox::models::{LineSegment, Particle};
/// use particle_sandbox::utils::Vector2;
///
/// let response = CollisionResponse { density: 1.0, restitution: 0.7, energy_loss: 0.0, overlap_gap: 0.01 };
/// let floor = LineSegment::new(Vector2::new(-10.0, 0.0), Vector2::new(10.0, 0.0));
/// let mut p = Particle::new(Vector2::new(0.0, -0.5), 1.0).unwrap();
///
/// assert!(resolve_static_line(&mut p, &floor, &response));
/// assert!((p.position.y + 1.01).abs() < 1e-12);
/// ```
pub fn resolve_static_line(particle: &mut Particle, segment: &LineSegment, response: &CollisionResponse) -> bool {
    let Some(normal) = segment.unit_normal() else {
        return false;
    };
    let along = segment.b - segment.a;
    let length = along.length();
    let tangent = along / length;

    let offset = particle.position - segment.a;
    let projection = offset.dot(tangent);
    if projection < 0.0 || projection > length {
        return false;
    }

    let distance = offset.dot(normal);
    if distance.abs() >= particle.radius {
        return false;
    }

    let side = if distance >= 0.0 { normal } else { -normal };
    particle.position += side * (particle.radius - distance.abs() + response.overlap_gap);

    let approach = particle.velocity.dot(side);
    if approach < 0.0 {
        particle.velocity -= side * (2.0 * approach * response.restitution * response.retained());
    }

    true
}

/// Signed distance from `point` to the infinite line through `segment`, positive on the
/// side its normal points to. `None` for a zero-length segment.
pub fn signed_distance(point: Vector2, segment: &LineSegment) -> Option<f64> {
    segment.unit_normal().map(|normal| (point - segment.a).dot(normal))
}
