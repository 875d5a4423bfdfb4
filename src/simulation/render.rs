//! Drawing seam between the simulation and whatever puts pixels on screen.
//!
//! The container describes *what* to draw through [`DrawStyle`]; colours, camera and
//! window handling belong to the [`RenderSink`] implementation.

use crate::models::ParticleId;
use crate::quadtree::QuadTreeBox;
use crate::utils::Vector2;

/// Intent of a draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawStyle {
    /// A simulated particle. `heat` is its speed mapped onto `[0, 1]`, saturating at
    /// [`HEAT_SPEED_CEILING`](crate::utils::HEAT_SPEED_CEILING).
    Particle { speed: f64, heat: f64 },
    /// A member of the selected leaf.
    Highlight,
    /// Debug velocity line of a selected particle.
    Velocity,
    StaticLine,
    /// Normal of a static line, drawn from its midpoint.
    Normal,
    /// Outline of a quadtree leaf.
    QuadLeaf { selected: bool },
    /// Slingshot line of a placement in progress.
    Preview,
}

/// Receives draw calls in world coordinates.
pub trait RenderSink {
    fn draw_disc(&mut self, center: Vector2, radius: f64, style: DrawStyle);
    fn draw_line(&mut self, a: Vector2, b: Vector2, thickness: f64, style: DrawStyle);
    /// `min` is the top-left corner.
    fn draw_rect(&mut self, min: Vector2, size: Vector2, style: DrawStyle);
}

/// A leaf picked for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafView {
    pub boundary: QuadTreeBox,
    /// Every particle in the leaf bucket, halo copies included, in bucket order.
    pub members: Vec<ParticleId>,
}
