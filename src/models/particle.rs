use std::fmt;

use crate::utils::{disc_area, SimulationError, Vector2};

/// Stable handle to a particle, valid until that particle is despawned.
///
/// The generation is bumped whenever a slot is vacated, so a stale handle never
/// resolves to a particle that later reuses the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId {
    index: u32,
    generation: u32,
}

impl ParticleId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        ParticleId { index, generation }
    }

    /// Slot index inside the owning store.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Generation of the slot at the time this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Particle({}, gen: {})", self.index, self.generation)
    }
}

/// A circular body. Its area stands in for mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Added to the velocity once per tick.
    pub acceleration: Vector2,
    pub radius: f64,
}

impl Particle {
    /// Creates a resting particle.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidRadius`] if `radius` is not a finite positive number.
    ///
    /// # Examples
    ///
    /// ```
    /// use particle_sandbox::models::Particle;
    /// use particle_sandbox::utils::Vector2;
    ///
    /// let particle = Particle::new(Vector2::new(1.0, 2.0), 0.5).expect("valid radius");
    /// assert_eq!(particle.velocity, Vector2::ZERO);
    ///
    /// assert!(Particle::new(Vector2::ZERO, 0.0).is_err());
    /// ```
    pub fn new(position: Vector2, radius: f64) -> Result<Self, SimulationError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimulationError::InvalidRadius(radius));
        }
        Ok(Particle {
            position,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            radius,
        })
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vector2) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// `π·r²`
    pub fn area(&self) -> f64 {
        disc_area(self.radius)
    }

    /// Effective mass for a given material density.
    pub fn mass(&self, density: f64) -> f64 {
        self.area() * density
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// `area·|v|²`, the quantity an elastic collision leaves unchanged.
    pub fn kinetic_energy_proxy(&self) -> f64 {
        self.area() * self.velocity.length_squared()
    }

    /// True if the particle's centre lies outside the square `±half_dimension`.
    pub fn is_outside(&self, half_dimension: f64) -> bool {
        self.position.x > half_dimension
            || self.position.x < -half_dimension
            || self.position.y > half_dimension
            || self.position.y < -half_dimension
    }
}
