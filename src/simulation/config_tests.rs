use crate::simulation::{FrictionModel, SimulationConfig};
use crate::utils::{SimulationError, Vector2, DEFAULT_SIMULATION_CONFIG};
use crate::assert_float_eq;

#[test]
fn test_default_matches_shipped_tuning() {
    let config = SimulationConfig::default();
    assert_eq!(config, DEFAULT_SIMULATION_CONFIG);
    assert_float_eq(config.density, 1.0, 1e-12, None);
    assert_float_eq(config.restitution, 0.7, 1e-12, None);
    assert_float_eq(config.friction, 0.001, 1e-12, None);
    assert_eq!(config.iteration_steps, 32);
    assert_eq!(config.quadrant_capacity, 96);
    assert_float_eq(config.node_half_dimension, 5000.0, 1e-12, None);
    assert_eq!(config.gravity, Vector2::ZERO);
    assert_eq!(config.friction_model, FrictionModel::SignOpposed);
    assert_eq!(config.worker_threads, 12);
    assert!(config.validate().is_ok());
}

#[test]
fn test_new_overrides_only_given_fields() {
    let config = SimulationConfig::new(None, Some(1.0), None, Some(0.0), None, Some(4), None, Some(100.0));
    assert_eq!(config.restitution, 1.0);
    assert_eq!(config.friction, 0.0);
    assert_eq!(config.iteration_steps, 4);
    assert_eq!(config.node_half_dimension, 100.0);
    assert_eq!(config.density, DEFAULT_SIMULATION_CONFIG.density);
    assert_eq!(config.quadrant_capacity, DEFAULT_SIMULATION_CONFIG.quadrant_capacity);
    assert_eq!(config.worker_threads, DEFAULT_SIMULATION_CONFIG.worker_threads);
}

#[test]
fn test_builder_setters() {
    let config = SimulationConfig::default()
        .with_gravity(Vector2::new(0.0, 0.05))
        .with_friction(0.01, FrictionModel::Clamped)
        .with_worker_threads(2)
        .with_quadrant_capacity(8);
    assert_eq!(config.gravity, Vector2::new(0.0, 0.05));
    assert_eq!(config.friction, 0.01);
    assert_eq!(config.friction_model, FrictionModel::Clamped);
    assert_eq!(config.worker_threads, 2);
    assert_eq!(config.quadrant_capacity, 8);
}

#[test]
fn test_validate_rejects_out_of_range_values() {
    let bad = [
        SimulationConfig { density: 0.0, ..Default::default() },
        SimulationConfig { restitution: 1.5, ..Default::default() },
        SimulationConfig { energy_loss: -0.1, ..Default::default() },
        SimulationConfig { friction: -1.0, ..Default::default() },
        SimulationConfig { overlap_gap: f64::NAN, ..Default::default() },
        SimulationConfig { node_half_dimension: 0.0, ..Default::default() },
        SimulationConfig { quadrant_capacity: 0, ..Default::default() },
        SimulationConfig { worker_threads: 0, ..Default::default() },
        SimulationConfig { gravity: Vector2::new(f64::INFINITY, 0.0), ..Default::default() },
    ];
    for config in bad {
        match config.validate() {
            Err(SimulationError::InvalidParameter(_)) => {}
            other => panic!("{:?} should be rejected, got {:?}", config, other),
        }
    }
}

#[test]
fn test_sign_opposed_friction_overshoots_zero() {
    let before = Vector2::new(0.0005, -0.0005);
    let after = FrictionModel::SignOpposed.apply(before, before, 0.001);
    assert_float_eq(after.x, -0.0005, 1e-15, None);
    assert_float_eq(after.y, 0.0005, 1e-15, None);
}

#[test]
fn test_sign_opposed_uses_velocity_before_integration() {
    // Gravity flipped the component this tick; friction still opposes the old sign.
    let before = Vector2::new(-0.5, 0.0);
    let integrated = Vector2::new(0.5, 0.0);
    let after = FrictionModel::SignOpposed.apply(integrated, before, 0.1);
    assert_float_eq(after.x, 0.6, 1e-12, None);
    // A resting component is pushed in the positive direction.
    assert_float_eq(after.y, 0.1, 1e-12, None);
}

#[test]
fn test_clamped_friction_stops_at_zero() {
    let v = Vector2::new(0.0005, -2.0);
    let after = FrictionModel::Clamped.apply(v, v, 0.001);
    assert_eq!(after.x, 0.0);
    assert_float_eq(after.y, -1.999, 1e-12, None);
    assert_eq!(FrictionModel::Clamped.apply(Vector2::ZERO, Vector2::ZERO, 0.001), Vector2::ZERO);
}
