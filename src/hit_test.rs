use uuid::Uuid;

use super::*;
use crate::camera::{Size, Vector};

fn item_at(x: f64, y: f64, size: f64) -> Item {
    Item { id: Uuid::new_v4(), text: "🙂".into(), location: Point::new(x, y), size }
}

fn camera() -> Camera {
    Camera::new(Vector::zero(), 1.0, Size::new(400.0, 400.0))
}

#[test]
fn hit_center_of_item() {
    let item = item_at(0.0, 0.0, 40.0);
    let id = item.id;
    assert_eq!(hit_test(Point::new(200.0, 200.0), &[item], &camera()), Some(id));
}

#[test]
fn hit_edge_of_item_is_inclusive() {
    let item = item_at(0.0, 0.0, 40.0);
    let id = item.id;
    assert_eq!(hit_test(Point::new(220.0, 180.0), &[item], &camera()), Some(id));
}

#[test]
fn miss_outside_item() {
    let item = item_at(0.0, 0.0, 40.0);
    assert_eq!(hit_test(Point::new(221.0, 200.0), &[item], &camera()), None);
}

#[test]
fn topmost_item_wins() {
    let below = item_at(0.0, 0.0, 40.0);
    let above = item_at(5.0, 5.0, 40.0);
    let above_id = above.id;
    assert_eq!(hit_test(Point::new(203.0, 203.0), &[below, above], &camera()), Some(above_id));
}

#[test]
fn hit_box_scales_with_zoom() {
    let item = item_at(10.0, 0.0, 40.0);
    let id = item.id;
    let zoomed = Camera::new(Vector::zero(), 2.0, Size::new(400.0, 400.0));
    // Center on screen is (220, 200); half side is 40.
    assert_eq!(hit_test(Point::new(259.0, 200.0), std::slice::from_ref(&item), &zoomed), Some(id));
    assert_eq!(hit_test(Point::new(259.0, 200.0), &[item], &camera()), None);
}

#[test]
fn tap_target_classifies() {
    let item = item_at(0.0, 0.0, 40.0);
    let id = item.id;
    let items = [item];
    assert_eq!(tap_target(Point::new(200.0, 200.0), &items, &camera()), TapTarget::Item(id));
    assert_eq!(tap_target(Point::new(0.0, 0.0), &items, &camera()), TapTarget::Canvas);
}
