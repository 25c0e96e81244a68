#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::doc::{Item, ItemId};
use crate::input::TapTarget;

/// Test which item (if any) is under `screen_pt`.
///
/// Each item occupies a square of side `size × zoom` centered on its location.
/// Items drawn later sit on top, so they are tested first.
#[must_use]
pub fn hit_test(screen_pt: Point, items: &[Item], camera: &Camera) -> Option<ItemId> {
    items
        .iter()
        .rev()
        .find(|item| {
            let center = camera.document_to_screen(item.location);
            let half = item.size * camera.zoom / 2.0;
            (screen_pt.x - center.x).abs() <= half && (screen_pt.y - center.y).abs() <= half
        })
        .map(|item| item.id)
}

/// Classify a tap location as hitting an item or the empty canvas.
#[must_use]
pub fn tap_target(screen_pt: Point, items: &[Item], camera: &Camera) -> TapTarget {
    hit_test(screen_pt, items, camera).map_or(TapTarget::Canvas, TapTarget::Item)
}
