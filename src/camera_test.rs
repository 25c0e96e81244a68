#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn view() -> Size {
    Size::new(400.0, 400.0)
}

// --- Value types ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_minus_point_is_vector() {
    let v = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
    assert_eq!(v, Vector::new(3.0, 4.0));
}

#[test]
fn vector_scales_and_divides() {
    let v = Vector::new(2.0, -4.0);
    assert_eq!(v * 2.0, Vector::new(4.0, -8.0));
    assert_eq!(v / 2.0, Vector::new(1.0, -2.0));
    assert_eq!(-v, Vector::new(-2.0, 4.0));
}

#[test]
fn vector_zero_is_zero() {
    assert!(Vector::zero().is_zero());
    assert!(!Vector::new(0.0, 0.1).is_zero());
}

#[test]
fn size_half_is_center_offset() {
    assert_eq!(view().half(), Vector::new(200.0, 200.0));
}

#[test]
fn size_is_positive_rejects_zero_and_negative() {
    assert!(Size::new(1.0, 1.0).is_positive());
    assert!(!Size::new(0.0, 50.0).is_positive());
    assert!(!Size::new(50.0, -1.0).is_positive());
    assert!(!Size::new(f64::INFINITY, 1.0).is_positive());
}

// --- to_document_space ---

#[test]
fn to_document_center_of_view_is_origin() {
    let doc = to_document_space(Point::new(200.0, 200.0), view(), Vector::zero(), 1.0);
    assert!(point_approx_eq(doc, Point::zero()));
}

#[test]
fn to_document_top_left_quadrant_is_negative() {
    let doc = to_document_space(Point::new(100.0, 100.0), view(), Vector::zero(), 1.0);
    assert!(point_approx_eq(doc, Point::new(-100.0, -100.0)));
}

#[test]
fn to_document_subtracts_pan() {
    let doc = to_document_space(Point::new(250.0, 230.0), view(), Vector::new(50.0, 30.0), 1.0);
    assert!(point_approx_eq(doc, Point::zero()));
}

#[test]
fn to_document_divides_by_zoom() {
    let doc = to_document_space(Point::new(300.0, 100.0), view(), Vector::zero(), 2.0);
    assert!(point_approx_eq(doc, Point::new(50.0, -50.0)));
}

// --- to_screen_space ---

#[test]
fn to_screen_origin_is_view_center() {
    let screen = to_screen_space(Point::zero(), view(), Vector::zero(), 3.0);
    assert!(point_approx_eq(screen, Point::new(200.0, 200.0)));
}

#[test]
fn to_screen_applies_zoom_then_pan() {
    let screen = to_screen_space(Point::new(10.0, -10.0), view(), Vector::new(5.0, 5.0), 2.0);
    assert!(point_approx_eq(screen, Point::new(225.0, 185.0)));
}

// --- Round trip ---

#[test]
fn round_trip_document_screen_document() {
    let pans = [Vector::zero(), Vector::new(-37.5, 12.25), Vector::new(1000.0, -999.0)];
    let zooms = [0.1, 0.5, 1.0, 2.75, 40.0];
    let views = [Size::new(400.0, 400.0), Size::new(1024.0, 768.0), Size::new(1.0, 3.0)];
    let points = [Point::zero(), Point::new(-100.0, 250.0), Point::new(0.001, -12345.6)];
    for &pan in &pans {
        for &zoom in &zooms {
            for &view in &views {
                for &p in &points {
                    let screen = to_screen_space(p, view, pan, zoom);
                    let back = to_document_space(screen, view, pan, zoom);
                    assert!((back.x - p.x).abs() < 1e-6, "x: {back:?} vs {p:?}");
                    assert!((back.y - p.y).abs() < 1e-6, "y: {back:?} vs {p:?}");
                }
            }
        }
    }
}

// --- Camera ---

#[test]
fn camera_default_is_identity_zoom() {
    let cam = Camera::default();
    assert_eq!(cam.pan, Vector::zero());
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn camera_delegates_to_free_functions() {
    let cam = Camera::new(Vector::new(10.0, 20.0), 2.0, view());
    let p = Point::new(7.0, -3.0);
    assert_eq!(cam.document_to_screen(p), to_screen_space(p, view(), cam.pan, cam.zoom));
    let s = Point::new(17.0, 300.0);
    assert_eq!(cam.screen_to_document(s), to_document_space(s, view(), cam.pan, cam.zoom));
}

#[test]
fn camera_screen_dist_to_document() {
    let cam = Camera::new(Vector::zero(), 4.0, view());
    assert!(approx_eq(cam.screen_dist_to_document(20.0), 5.0));
}
