//! Iterative contact solver for one quadtree leaf.
//!
//! A leaf is solved on a private copy of its particles, so any number of leaves can be
//! solved at once against a shared, read-only particle store. The results come back as
//! deltas that the caller adds onto the store.
//!
//! A particle near a split line sits in several leaves, so a pair of particles can meet in
//! more than one leaf. Each pair is resolved in exactly one of them: the leaf that owns the
//! pair's anchor, the member with the smaller radius (ties go to the lower id). That leaf
//! always holds the partner as well, because an overlapping partner is at most twice its
//! own radius away and is copied into every quadrant within that reach. Corrections made
//! to halo members there are handed back too, so nothing is lost at the split line.

use std::cmp::Ordering;

use crate::interactions::{resolve_particle_pair, resolve_static_line, CollisionResponse};
use crate::models::{LineSegment, Particle, ParticleId, ParticleStore};
use crate::quadtree::LeafEntry;
use crate::simulation::SimulationConfig;
use crate::utils::Vector2;

/// Change a leaf made to one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafUpdate {
    pub id: ParticleId,
    pub position_delta: Vector2,
    pub velocity_delta: Vector2,
}

/// Gauss–Seidel style relaxation of particle/particle and particle/line contacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafSolver {
    pub response: CollisionResponse,
    /// Number of full passes over the leaf.
    pub iteration_steps: usize,
}

impl LeafSolver {
    pub fn new(response: CollisionResponse, iteration_steps: usize) -> Self {
        LeafSolver { response, iteration_steps }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        LeafSolver::new(
            CollisionResponse {
                density: config.density,
                restitution: config.restitution,
                energy_loss: config.energy_loss,
                overlap_gap: config.overlap_gap,
            },
            config.iteration_steps,
        )
    }

    /// Solves one leaf and returns what it changed.
    ///
    /// Pairs are resolved only when their anchor is owned here, and static segments only
    /// act on owned members. Every owned member gets an update (possibly zero); a halo
    /// member gets one only if a pair resolved here moved it. Entries whose handle is no
    /// longer in `particles` are ignored.
    pub fn solve(&self, entries: &[LeafEntry], particles: &ParticleStore, segments: &[LineSegment]) -> Vec<LeafUpdate> {
        let (members, initial): (Vec<LeafEntry>, Vec<Particle>) = entries
            .iter()
            .filter_map(|entry| particles.get(entry.id).map(|p| (*entry, *p)))
            .unzip();

        let owned: Vec<bool> = members.iter().map(|entry| entry.owned).collect();
        let mut bodies = initial.clone();
        self.run_passes(&mut bodies, &owned, |i, j| pair_anchor(&members, &initial, i, j), segments);

        members
            .iter()
            .zip(initial.iter().zip(&bodies))
            .filter_map(|(entry, (before, after))| {
                let update = LeafUpdate {
                    id: entry.id,
                    position_delta: after.position - before.position,
                    velocity_delta: after.velocity - before.velocity,
                };
                let moved = update.position_delta != Vector2::ZERO || update.velocity_delta != Vector2::ZERO;
                (entry.owned || moved).then_some(update)
            })
            .collect()
    }

    /// Runs `iteration_steps` passes over `bodies` in place and returns the number of
    /// contacts resolved.
    ///
    /// Each pass visits every ordered pair `(a, b)`, `a != b`, then every body against
    /// every segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use particle_sandbox::interactions::{CollisionResponse, LeafSolver};
    /// use particle_sandbox::models::Particle;
    /// use particle_sandbox::utils::Vector2;
    ///
    /// let response = CollisionResponse { density: 1.0, restitution: 0.7, energy_loss: 0.0, overlap_gap: 0.01 };
    /// let solver = LeafSolver::new(response, 8);
    /// let mut bodies = vec![
    ///     Particle::new(Vector2::new(0.0, 0.0), 1.0).unwrap(),
    ///     Particle::new(Vector2::new(1.0, 0.0), 1.0).unwrap(),
    /// ];
    ///
    /// solver.relax(&mut bodies, &[]);
    /// let gap = bodies[0].position.distance(bodies[1].position);
    /// assert!(gap >= 2.0 - 1e-9);
    /// ```
    pub fn relax(&self, bodies: &mut [Particle], segments: &[LineSegment]) -> usize {
        let owned = vec![true; bodies.len()];
        self.run_passes(bodies, &owned, |i, _| i, segments)
    }

    /// Pass loop shared by [`solve`](LeafSolver::solve) and [`relax`](LeafSolver::relax).
    /// `anchor(i, j)` names the body whose ownership decides whether the pair is resolved.
    fn run_passes<F>(&self, bodies: &mut [Particle], owned: &[bool], anchor: F, segments: &[LineSegment]) -> usize
    where
        F: Fn(usize, usize) -> usize,
    {
        let mut contacts = 0;
        for _ in 0..self.iteration_steps {
            for i in 0..bodies.len() {
                for j in 0..bodies.len() {
                    if i == j || !owned[anchor(i, j)] {
                        continue;
                    }
                    let (a, b) = pair_mut(bodies, i, j);
                    if resolve_particle_pair(a, b, &self.response) {
                        contacts += 1;
                    }
                }
            }

            for (body, _) in bodies.iter_mut().zip(owned).filter(|(_, is_owned)| **is_owned) {
                for segment in segments {
                    if resolve_static_line(body, segment, &self.response) {
                        contacts += 1;
                    }
                }
            }
        }
        contacts
    }
}

/// Smaller radius first, then lower id.
fn pair_anchor(members: &[LeafEntry], bodies: &[Particle], i: usize, j: usize) -> usize {
    match bodies[i].radius.partial_cmp(&bodies[j].radius) {
        Some(Ordering::Less) => i,
        Some(Ordering::Greater) => j,
        _ if members[i].id < members[j].id => i,
        _ => j,
    }
}

/// Two distinct mutable elements of a slice.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (low, high) = items.split_at_mut(j);
        (&mut low[i], &mut high[0])
    } else {
        let (low, high) = items.split_at_mut(i);
        (&mut high[0], &mut low[j])
    }
}
