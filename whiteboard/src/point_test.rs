#![allow(clippy::float_cmp)]

use super::*;

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_midpoint_is_symmetric() {
    let a = Point::new(0.0, 10.0);
    let b = Point::new(20.0, 30.0);
    assert_eq!(a.midpoint(b), Point::new(10.0, 20.0));
    assert_eq!(b.midpoint(a), Point::new(10.0, 20.0));
}

#[test]
fn point_serializes_as_xy_object() {
    let json = serde_json::to_value(Point::new(1.5, 2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": 2.0 }));
}

// --- Viewport ---

#[test]
fn to_surface_subtracts_origin() {
    let vp = Viewport::new(100.0, 50.0, 800.0, 600.0);
    assert_eq!(vp.to_surface(Point::new(150.0, 70.0)), Point::new(50.0, 20.0));
}

#[test]
fn to_surface_clamps_to_surface_bounds() {
    let vp = Viewport::new(100.0, 50.0, 800.0, 600.0);
    assert_eq!(vp.to_surface(Point::new(10.0, 10.0)), Point::new(0.0, 0.0));
    assert_eq!(vp.to_surface(Point::new(2000.0, 2000.0)), Point::new(800.0, 600.0));
}

#[test]
fn to_surface_unmeasured_viewport_does_not_clamp() {
    let vp = Viewport::default();
    assert_eq!(vp.to_surface(Point::new(-5.0, 12.0)), Point::new(-5.0, 12.0));
}

#[test]
fn to_surface_keeps_edge_points() {
    let vp = Viewport::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(vp.to_surface(Point::new(100.0, 0.0)), Point::new(100.0, 0.0));
}
