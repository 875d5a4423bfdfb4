use std::fmt;
use std::error::Error;

use crate::models::{ParticleId, StaticPointId};

/// Represents errors that can occur while building or stepping a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The handle does not refer to a live particle (never existed, or was despawned).
    ParticleNotFound(ParticleId),
    /// The static point index is outside the point store.
    StaticPointNotFound(StaticPointId),
    /// A static line was requested between two coincident points.
    DegenerateLine,
    /// Indicates an invalid particle radius (non-finite, zero or negative).
    InvalidRadius(f64),
    /// A tuning parameter is outside its accepted range.
    InvalidParameter(String),
    /// The worker pool could not be created.
    ThreadPool(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::ParticleNotFound(id) => write!(f, "Particle not found: {}", id),
            SimulationError::StaticPointNotFound(id) => write!(f, "Static point not found: {}", id),
            SimulationError::DegenerateLine => write!(f, "Static line endpoints coincide"),
            SimulationError::InvalidRadius(r) => write!(f, "Invalid radius value: {}", r),
            SimulationError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            SimulationError::ThreadPool(msg) => write!(f, "Thread pool error: {}", msg),
        }
    }
}

impl Error for SimulationError {}
