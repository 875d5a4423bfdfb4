use crate::utils::{SimulationError, Vector2, DEFAULT_SIMULATION_CONFIG};

/// How the per-tick friction step treats a velocity component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrictionModel {
    /// Pushes against the sign the component had before integration, even if that
    /// overshoots zero. Near-zero velocities jitter around zero.
    #[default]
    SignOpposed,
    /// Moves the component towards zero and stops there.
    Clamped,
}

impl FrictionModel {
    /// Applies one friction step to `velocity`, using `before` (the velocity at the start of
    /// the tick) to pick the direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use particle_sandbox::simulation::FrictionModel;
    /// use particle_sandbox::utils::Vector2;
    ///
    /// let slow = Vector2::new(0.0005, 0.0);
    /// let opposed = FrictionModel::SignOpposed.apply(slow, slow, 0.001);
    /// assert!(opposed.x < 0.0);
    ///
    /// let clamped = FrictionModel::Clamped.apply(slow, slow, 0.001);
    /// assert_eq!(clamped.x, 0.0);
    /// ```
    pub fn apply(self, velocity: Vector2, before: Vector2, friction: f64) -> Vector2 {
        match self {
            FrictionModel::SignOpposed => {
                let fx = if before.x > 0.0 { -friction } else { friction };
                let fy = if before.y > 0.0 { -friction } else { friction };
                velocity + Vector2::new(fx, fy)
            }
            FrictionModel::Clamped => Vector2::new(
                towards_zero(velocity.x, friction),
                towards_zero(velocity.y, friction),
            ),
        }
    }
}

fn towards_zero(value: f64, step: f64) -> f64 {
    if value > 0.0 {
        (value - step).max(0.0)
    } else {
        (value + step).min(0.0)
    }
}

/// Tuning of a [`SimulationContainer`](crate::simulation::SimulationContainer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Mass per unit area.
    pub density: f64,
    pub restitution: f64,
    pub energy_loss: f64,
    /// Speed removed from each velocity component per tick.
    pub friction: f64,
    pub overlap_gap: f64,
    /// Solver passes per leaf per tick.
    pub iteration_steps: usize,
    /// Leaf population above which a node splits.
    pub quadrant_capacity: usize,
    /// Half size of the world box. Particles outside it are despawned.
    pub node_half_dimension: f64,
    /// Acceleration given to particles created by the container.
    pub gravity: Vector2,
    pub friction_model: FrictionModel,
    pub worker_threads: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    /// Builds a configuration, taking every `None` from [`DEFAULT_SIMULATION_CONFIG`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        density: Option<f64>,
        restitution: Option<f64>,
        energy_loss: Option<f64>,
        friction: Option<f64>,
        overlap_gap: Option<f64>,
        iteration_steps: Option<usize>,
        quadrant_capacity: Option<usize>,
        node_half_dimension: Option<f64>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            density: density.unwrap_or(default.density),
            restitution: restitution.unwrap_or(default.restitution),
            energy_loss: energy_loss.unwrap_or(default.energy_loss),
            friction: friction.unwrap_or(default.friction),
            overlap_gap: overlap_gap.unwrap_or(default.overlap_gap),
            iteration_steps: iteration_steps.unwrap_or(default.iteration_steps),
            quadrant_capacity: quadrant_capacity.unwrap_or(default.quadrant_capacity),
            node_half_dimension: node_half_dimension.unwrap_or(default.node_half_dimension),
            ..default
        }
    }

    pub fn with_gravity(mut self, gravity: Vector2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: f64, model: FrictionModel) -> Self {
        self.friction = friction;
        self.friction_model = model;
        self
    }

    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_energy_loss(mut self, energy_loss: f64) -> Self {
        self.energy_loss = energy_loss;
        self
    }

    pub fn with_iteration_steps(mut self, iteration_steps: usize) -> Self {
        self.iteration_steps = iteration_steps;
        self
    }

    pub fn with_quadrant_capacity(mut self, quadrant_capacity: usize) -> Self {
        self.quadrant_capacity = quadrant_capacity;
        self
    }

    pub fn with_node_half_dimension(mut self, node_half_dimension: f64) -> Self {
        self.node_half_dimension = node_half_dimension;
        self
    }

    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    /// Checks every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.density > 0.0 && self.density.is_finite()) {
            return Err(invalid("density", self.density));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(invalid("restitution", self.restitution));
        }
        if !(0.0..=1.0).contains(&self.energy_loss) {
            return Err(invalid("energy_loss", self.energy_loss));
        }
        if !(self.friction >= 0.0 && self.friction.is_finite()) {
            return Err(invalid("friction", self.friction));
        }
        if !(self.overlap_gap >= 0.0 && self.overlap_gap.is_finite()) {
            return Err(invalid("overlap_gap", self.overlap_gap));
        }
        if !(self.node_half_dimension > 0.0 && self.node_half_dimension.is_finite()) {
            return Err(invalid("node_half_dimension", self.node_half_dimension));
        }
        if !self.gravity.is_finite() {
            return Err(SimulationError::InvalidParameter(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if self.quadrant_capacity == 0 {
            return Err(SimulationError::InvalidParameter(
                "quadrant_capacity must be at least 1".to_string(),
            ));
        }
        if self.worker_threads == 0 {
            return Err(SimulationError::InvalidParameter(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn invalid(name: &str, value: f64) -> SimulationError {
    SimulationError::InvalidParameter(format!("{} out of range: {}", name, value))
}
