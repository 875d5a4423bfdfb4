//! Owns every particle and static line of a sandbox and steps them.
//!
//! One [`update`](SimulationContainer::update) integrates all particles, rebuilds the
//! quadtree from scratch, resolves every non-empty leaf on the container's rayon pool and
//! then adds the per-leaf changes back on the calling thread, in leaf order. Each pair of
//! particles is resolved by exactly one leaf and the merge order is fixed, so the outcome
//! does not depend on the number of workers.
//!
//! # Example
//!
//! ```
//! use particle_sandbox::simulation::{SimulationConfig, SimulationContainer};
//! use particle_sandbox::utils::{SimulationError, Vector2};
//!
//! # fn main() -> Result<(), SimulationError> {
//! let config = SimulationConfig::default().with_gravity(Vector2::new(0.0, 0.01));
//! let mut sim = SimulationContainer::new(config)?;
//!
//! let a = sim.add_static_point(Vector2::new(-50.0, 5.0));
//! let b = sim.add_static_point(Vector2::new(50.0, 5.0));
//! sim.add_static_line(a, b)?;
//!
//! let id = sim.add_particle(Vector2::new(0.0, 0.0), 1.0)?;
//! for _ in 0..200 {
//!     sim.update()?;
//! }
//!
//! // Came to rest on the line instead of falling through it.
//! assert!(sim.particle(id)?.position.y < 5.0);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use log::{debug, trace, warn};
use rand::Rng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::interactions::{LeafSolver, LeafUpdate};
use crate::models::{
    LineSegment, Particle, ParticleId, ParticleStore, StaticLine, StaticPoint, StaticPointId,
};
use crate::quadtree::{QuadTree, QuadTreeBox};
use crate::simulation::{DrawStyle, LeafView, RenderSink, SimulationConfig};
use crate::utils::{
    map_range, SimulationError, Vector2, HEAT_SPEED_CEILING, NORMAL_RENDER_SCALE,
    PLACEMENT_VELOCITY_DIVISOR, VELOCITY_RENDER_SCALE,
};

const STATIC_LINE_THICKNESS: f64 = 0.01;
const DEBUG_LINE_THICKNESS: f64 = 0.1;
const LEAF_BORDER_THICKNESS: f64 = 0.4;

/// Counters describing one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Live particles after despawning.
    pub particles: usize,
    pub despawned: usize,
    pub leaves: usize,
    /// Leaves that were handed to the pool (non-empty ones).
    pub tasks: usize,
    pub max_leaf_population: usize,
}

pub struct SimulationContainer {
    config: SimulationConfig,
    solver: LeafSolver,
    pool: ThreadPool,
    particles: ParticleStore,
    static_points: Vec<StaticPoint>,
    static_lines: Vec<StaticLine>,
    quadtree: Arc<QuadTree>,
    running: bool,
    pending_placement: Option<Vector2>,
    selected: Option<LeafView>,
}

impl SimulationContainer {
    /// Creates an empty, running simulation.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not [`validate`](SimulationConfig::validate) or the worker
    /// pool cannot be started.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|index| format!("particle-sandbox-{}", index))
            .build()
            .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;
        debug!(
            "Simulation created with {} workers, capacity {}, half dimension {}",
            config.worker_threads, config.quadrant_capacity, config.node_half_dimension
        );

        Ok(SimulationContainer {
            solver: LeafSolver::from_config(&config),
            pool,
            particles: ParticleStore::new(),
            static_points: Vec::new(),
            static_lines: Vec::new(),
            quadtree: Arc::new(QuadTree::new(Self::world_box(&config), config.quadrant_capacity)),
            running: true,
            pending_placement: None,
            selected: None,
            config,
        })
    }

    fn world_box(config: &SimulationConfig) -> QuadTreeBox {
        QuadTreeBox::new(Vector2::ZERO, config.node_half_dimension)
    }

    /// Advances the simulation by one tick. Does nothing while paused.
    pub fn update(&mut self) -> Result<TickStats, SimulationError> {
        if !self.running {
            return Ok(TickStats::default());
        }
        self.selected = None;

        self.integrate();
        let despawned = self.despawn_outside();

        let tree = QuadTree::build(
            Self::world_box(&self.config),
            self.config.quadrant_capacity,
            &self.particles,
        );
        let leaves = tree.leaves();
        let segments = self.segments();

        let solver = &self.solver;
        let particles = &self.particles;
        let tree_ref = &tree;
        let results: Vec<Vec<LeafUpdate>> = self.pool.install(|| {
            leaves
                .par_iter()
                .map(|&leaf| tree_ref.entries(leaf))
                .filter(|entries| !entries.is_empty())
                .map(|entries| solver.solve(entries, particles, &segments))
                .collect()
        });

        // Leaf order, not completion order.
        for update in results.iter().flatten() {
            if let Some(particle) = self.particles.get_mut(update.id) {
                particle.position += update.position_delta;
                particle.velocity += update.velocity_delta;
            }
        }

        let stats = TickStats {
            particles: self.particles.len(),
            despawned,
            leaves: leaves.len(),
            tasks: results.len(),
            max_leaf_population: leaves
                .iter()
                .map(|&leaf| tree.entries(leaf).len())
                .max()
                .unwrap_or(0),
        };
        trace!("{:?}", stats);

        self.quadtree = Arc::new(tree);
        Ok(stats)
    }

    fn integrate(&mut self) {
        let friction = self.config.friction;
        let model = self.config.friction_model;
        for (_, p) in self.particles.iter_mut() {
            let before = p.velocity;
            p.velocity += p.acceleration;
            p.position += p.velocity;
            p.velocity = model.apply(p.velocity, before, friction);
        }
    }

    fn despawn_outside(&mut self) -> usize {
        let half = self.config.node_half_dimension;
        let removed = self.particles.retain(|_, p| !p.is_outside(half));
        for id in &removed {
            debug!("Despawned {} outside the world box", id);
        }
        removed.len()
    }

    fn segments(&self) -> Vec<LineSegment> {
        self.static_lines
            .iter()
            .filter_map(|line| line.segment(&self.static_points))
            .collect()
    }

    /// Adds a resting particle with the configured gravity as its acceleration.
    pub fn add_particle(&mut self, position: Vector2, radius: f64) -> Result<ParticleId, SimulationError> {
        let particle = Particle::new(position, radius)?.with_acceleration(self.config.gravity);
        Ok(self.particles.insert(particle))
    }

    /// Two-phase slingshot placement.
    ///
    /// A press (`released == false`) records `position`. A release spawns a particle at the
    /// recorded point, launched along `(recorded - position) / -10`, and returns its id.
    /// A release without a preceding press is ignored.
    pub fn place_particle(
        &mut self,
        position: Vector2,
        radius: f64,
        released: bool,
    ) -> Result<Option<ParticleId>, SimulationError> {
        if !released {
            self.pending_placement = Some(position);
            return Ok(None);
        }

        let Some(start) = self.pending_placement else {
            warn!("Placement released at {} without a press", position);
            return Ok(None);
        };
        let velocity = (start - position) / PLACEMENT_VELOCITY_DIVISOR;
        let particle = Particle::new(start, radius)?
            .with_velocity(velocity)
            .with_acceleration(self.config.gravity);
        self.pending_placement = None;
        Ok(Some(self.particles.insert(particle)))
    }

    pub fn pending_placement(&self) -> Option<Vector2> {
        self.pending_placement
    }

    /// Spawns `count` particles at uniform random offsets within `±spread` of `center`.
    pub fn scatter_particles<R: Rng>(
        &mut self,
        center: Vector2,
        spread: f64,
        count: usize,
        radius: f64,
        rng: &mut R,
    ) -> Result<Vec<ParticleId>, SimulationError> {
        if !(spread >= 0.0 && spread.is_finite()) {
            return Err(SimulationError::InvalidParameter(format!(
                "spread out of range: {}",
                spread
            )));
        }
        // Validate once up front so a bad radius adds nothing.
        Particle::new(center, radius)?;

        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let offset = if spread > 0.0 {
                Vector2::new(rng.random_range(-spread..=spread), rng.random_range(-spread..=spread))
            } else {
                Vector2::ZERO
            };
            ids.push(self.add_particle(center + offset, radius)?);
        }
        debug!("Scattered {} particles around {}", count, center);
        Ok(ids)
    }

    pub fn add_static_point(&mut self, position: Vector2) -> StaticPointId {
        self.static_points.push(StaticPoint::new(position));
        StaticPointId(self.static_points.len() - 1)
    }

    /// Connects two existing static points and returns the new line's index.
    pub fn add_static_line(&mut self, a: StaticPointId, b: StaticPointId) -> Result<usize, SimulationError> {
        let line = StaticLine::new(&self.static_points, a, b)?;
        self.static_lines.push(line);
        Ok(self.static_lines.len() - 1)
    }

    /// Toggles between running and paused.
    pub fn switch_running(&mut self) {
        self.running = !self.running;
        debug!("Simulation {}", if self.running { "resumed" } else { "paused" });
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particle(&self, id: ParticleId) -> Result<&Particle, SimulationError> {
        self.particles.get(id).ok_or(SimulationError::ParticleNotFound(id))
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Result<&mut Particle, SimulationError> {
        self.particles.get_mut(id).ok_or(SimulationError::ParticleNotFound(id))
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.particles.iter()
    }

    pub fn static_points(&self) -> &[StaticPoint] {
        &self.static_points
    }

    pub fn static_lines(&self) -> &[StaticLine] {
        &self.static_lines
    }

    /// Selects the leaf of the current quadtree that strictly contains `world`.
    ///
    /// A miss (outside the world, or exactly on a leaf edge) clears the selection rather
    /// than keeping the previous one, so [`selected`](Self::selected) always matches the
    /// last pick.
    pub fn select(&mut self, world: Vector2) -> Option<LeafView> {
        self.selected = self.quadtree.leaf_at(world).map(|leaf| LeafView {
            boundary: self.quadtree.boundary(leaf),
            members: self.quadtree.entries(leaf).iter().map(|e| e.id).collect(),
        });
        self.selected.clone()
    }

    /// [`select`](Self::select) with a screen position and the caller's camera transform.
    pub fn select_screen<F>(&mut self, screen: Vector2, to_world: F) -> Option<LeafView>
    where
        F: FnOnce(Vector2) -> Vector2,
    {
        self.select(to_world(screen))
    }

    pub fn selected(&self) -> Option<&LeafView> {
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Snapshot of the tree built by the last tick.
    pub fn quadtree(&self) -> Arc<QuadTree> {
        Arc::clone(&self.quadtree)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Draws particles, the selected leaf's debug overlay and static lines with their normals.
    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        for (_, p) in self.particles.iter() {
            let speed = p.speed();
            let heat = map_range(speed.min(HEAT_SPEED_CEILING), 0.0, HEAT_SPEED_CEILING, 0.0, 1.0);
            sink.draw_disc(p.position, p.radius, DrawStyle::Particle { speed, heat });
        }

        if let Some(view) = &self.selected {
            for p in view.members.iter().filter_map(|&id| self.particles.get(id)) {
                sink.draw_disc(p.position, p.radius, DrawStyle::Highlight);
                sink.draw_line(
                    p.position,
                    p.position + p.velocity * VELOCITY_RENDER_SCALE,
                    DEBUG_LINE_THICKNESS,
                    DrawStyle::Velocity,
                );
            }
        }

        for segment in self.segments() {
            sink.draw_line(segment.a, segment.b, STATIC_LINE_THICKNESS, DrawStyle::StaticLine);
            let mid = segment.midpoint();
            sink.draw_line(
                mid,
                mid + segment.normal() * NORMAL_RENDER_SCALE,
                DEBUG_LINE_THICKNESS,
                DrawStyle::Normal,
            );
        }
    }

    /// Draws the slingshot line from the pending spawn point to `cursor`, if any.
    pub fn render_placement_preview<S: RenderSink + ?Sized>(&self, cursor: Vector2, sink: &mut S) {
        if let Some(start) = self.pending_placement {
            sink.draw_line(start, cursor, DEBUG_LINE_THICKNESS, DrawStyle::Preview);
        }
    }

    /// Draws every leaf of the current quadtree as a filled box with an inset border.
    pub fn render_quadtree<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        let selected = self.selected.as_ref().map(|view| view.boundary);
        let inset = LEAF_BORDER_THICKNESS / 2.0;
        for leaf in self.quadtree.leaves() {
            let boundary = self.quadtree.boundary(leaf);
            let style = DrawStyle::QuadLeaf { selected: selected == Some(boundary) };
            sink.draw_rect(boundary.min(), boundary.size(), style);

            let min = boundary.min() + Vector2::splat(inset);
            let max = boundary.min() + boundary.size() - Vector2::splat(inset);
            let corners = [min, Vector2::new(max.x, min.y), max, Vector2::new(min.x, max.y)];
            for i in 0..4 {
                sink.draw_line(corners[i], corners[(i + 1) % 4], LEAF_BORDER_THICKNESS, style);
            }
        }
    }
}
