use crate::simulation::{FrictionModel, SimulationConfig};
use crate::utils::Vector2;

/// Tuning values the sandbox ships with.
pub const DEFAULT_SIMULATION_CONFIG: SimulationConfig = SimulationConfig {
    density: 1.0,
    restitution: 0.7,
    energy_loss: 0.0,
    friction: 0.001,
    overlap_gap: 0.01,
    iteration_steps: 32,
    quadrant_capacity: 96,
    node_half_dimension: 5000.0,
    gravity: Vector2::ZERO,
    friction_model: FrictionModel::SignOpposed,
    worker_threads: 12,
};

/// Nodes whose half dimension would drop to this value (or below) when halved are never split.
pub const MIN_SPLIT_HALF_DIMENSION: f64 = 2.0;

/// A particle is copied into every child quadrant its `radius * STRADDLE_FACTOR` box touches.
pub const STRADDLE_FACTOR: f64 = 2.0;

/// Launch velocity of a placed particle is the drag vector divided by this value.
pub const PLACEMENT_VELOCITY_DIVISOR: f64 = -10.0;

/// Static line normals are drawn at this fraction of the (unnormalised) normal length.
pub const NORMAL_RENDER_SCALE: f64 = 1.0 / 16.0;

/// Speed at which a particle is drawn at full heat.
pub const HEAT_SPEED_CEILING: f64 = 50.0;

/// Velocity debug lines are drawn this many ticks ahead.
pub const VELOCITY_RENDER_SCALE: f64 = 10.0;
