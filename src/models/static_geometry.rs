use std::fmt;

use crate::utils::{normalize_to, SimulationError, Vector2};

/// Index of a [`StaticPoint`] in its container's append-only point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StaticPointId(pub usize);

impl fmt::Display for StaticPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StaticPoint({})", self.0)
    }
}

/// Immovable anchor for static lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticPoint {
    pub position: Vector2,
}

impl StaticPoint {
    pub fn new(position: Vector2) -> Self {
        StaticPoint { position }
    }
}

/// A wall between two static points, referenced by index rather than by address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaticLine {
    pub a: StaticPointId,
    pub b: StaticPointId,
}

impl StaticLine {
    /// Creates a line between two points of `points`.
    ///
    /// # Errors
    ///
    /// * [`SimulationError::StaticPointNotFound`] if either index is out of range.
    /// * [`SimulationError::DegenerateLine`] if both points are at the same position.
    pub fn new(points: &[StaticPoint], a: StaticPointId, b: StaticPointId) -> Result<Self, SimulationError> {
        let pa = points.get(a.0).ok_or(SimulationError::StaticPointNotFound(a))?;
        let pb = points.get(b.0).ok_or(SimulationError::StaticPointNotFound(b))?;
        if normalize_to(pb.position - pa.position, 1.0).is_none() {
            return Err(SimulationError::DegenerateLine);
        }
        Ok(StaticLine { a, b })
    }

    /// Resolves the endpoints against the owning point list.
    pub fn segment(&self, points: &[StaticPoint]) -> Option<LineSegment> {
        let a = points.get(self.a.0)?.position;
        let b = points.get(self.b.0)?.position;
        Some(LineSegment::new(a, b))
    }
}

/// Resolved endpoints of a static line. This is what the solver works with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vector2,
    pub b: Vector2,
}

impl LineSegment {
    pub fn new(a: Vector2, b: Vector2) -> Self {
        LineSegment { a, b }
    }

    /// Perpendicular of `b - a`, *not* normalised. Its length equals the segment length.
    ///
    /// # Examples
    ///
    /// ```
    /// use particle_sandbox::models::LineSegment;
    /// use particle_sandbox::utils::Vector2;
    ///
    /// let line = LineSegment::new(Vector2::new(-10.0, 0.0), Vector2::new(10.0, 0.0));
    /// assert_eq!(line.normal(), Vector2::new(0.0, -20.0));
    /// ```
    pub fn normal(&self) -> Vector2 {
        let d = self.b - self.a;
        Vector2::new(d.y, -d.x)
    }

    /// Unit length normal, `None` for a zero-length segment.
    pub fn unit_normal(&self) -> Option<Vector2> {
        normalize_to(self.normal(), 1.0)
    }

    pub fn length(&self) -> f64 {
        (self.b - self.a).length()
    }

    pub fn midpoint(&self) -> Vector2 {
        (self.a + self.b) / 2.0
    }
}
