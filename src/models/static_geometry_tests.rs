use approx::assert_relative_eq;

use crate::models::{LineSegment, StaticLine, StaticPoint, StaticPointId};
use crate::utils::{SimulationError, Vector2};

fn points() -> Vec<StaticPoint> {
    vec![
        StaticPoint::new(Vector2::new(-10.0, 0.0)),
        StaticPoint::new(Vector2::new(10.0, 0.0)),
        StaticPoint::new(Vector2::new(10.0, 0.0)),
    ]
}

#[test]
fn test_static_line_resolves_segment() {
    let pts = points();
    let line = StaticLine::new(&pts, StaticPointId(0), StaticPointId(1)).expect("valid line");
    let segment = line.segment(&pts).expect("points exist");
    assert_eq!(segment.a, Vector2::new(-10.0, 0.0));
    assert_eq!(segment.b, Vector2::new(10.0, 0.0));
    assert_relative_eq!(segment.length(), 20.0);
    assert_eq!(segment.midpoint(), Vector2::ZERO);
}

#[test]
fn test_static_line_rejects_missing_point() {
    let pts = points();
    assert_eq!(
        StaticLine::new(&pts, StaticPointId(0), StaticPointId(7)),
        Err(SimulationError::StaticPointNotFound(StaticPointId(7)))
    );
}

#[test]
fn test_static_line_rejects_zero_length() {
    let pts = points();
    assert_eq!(
        StaticLine::new(&pts, StaticPointId(1), StaticPointId(2)),
        Err(SimulationError::DegenerateLine)
    );
}

#[test]
fn test_normal_is_perpendicular_and_unnormalised() {
    let segment = LineSegment::new(Vector2::new(0.0, 0.0), Vector2::new(0.0, 4.0));
    let normal = segment.normal();
    assert_eq!(normal, Vector2::new(4.0, 0.0));
    assert_relative_eq!(normal.dot(segment.b - segment.a), 0.0);

    let unit = segment.unit_normal().unwrap();
    assert_relative_eq!(unit.x, 1.0);
    assert_relative_eq!(unit.y, 0.0);
}

#[test]
fn test_reversed_line_flips_normal() {
    let forward = LineSegment::new(Vector2::new(-10.0, 0.0), Vector2::new(10.0, 0.0));
    let backward = LineSegment::new(Vector2::new(10.0, 0.0), Vector2::new(-10.0, 0.0));
    let up = forward.unit_normal().unwrap();
    let down = backward.unit_normal().unwrap();
    assert_relative_eq!(up.x, 0.0);
    assert_relative_eq!(up.y, -1.0);
    assert_relative_eq!(down.x, 0.0);
    assert_relative_eq!(down.y, 1.0);
}
