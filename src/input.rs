//! Input model: gesture events and the per-gesture routing state.
//!
//! `GestureEvent` is what the host feeds the engine, one recognized gesture
//! phase at a time. `DragState` and `PinchState` record what an in-flight
//! gesture was routed to when it began. The route, including the exact set
//! of targeted items, is frozen for the lifetime of the gesture: selection
//! changes while it runs never redirect it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Vector};
use crate::doc::ItemId;
use crate::drop::Payload;

/// What a tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum TapTarget {
    /// Empty canvas (or the background image).
    Canvas,
    /// A placed item.
    Item(ItemId),
}

/// One recognized gesture phase, in the order the host observed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    DragBegan,
    /// Live translation since the drag began, in screen pixels.
    DragChanged { translation: Vector },
    DragEnded { translation: Vector },
    DragCancelled,
    PinchBegan,
    /// Live scale since the pinch began.
    PinchChanged { scale: f64 },
    PinchEnded { scale: f64 },
    PinchCancelled,
    Tap { count: u32, target: TapTarget },
    Drop { location: Point, payloads: Vec<Payload> },
}

/// What an in-flight gesture acts on.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureTarget {
    /// The whole document: the viewport pans or zooms.
    Viewport,
    /// Only these items, captured from the selection when the gesture began.
    Items(Vec<ItemId>),
}

impl GestureTarget {
    /// Whether `id` is one of the frozen targets.
    #[must_use]
    pub fn targets(&self, id: &ItemId) -> bool {
        match self {
            Self::Viewport => false,
            Self::Items(ids) => ids.contains(id),
        }
    }

    /// Drop `id` from the frozen target set. Returns true if it was there.
    pub fn forget(&mut self, id: &ItemId) -> bool {
        match self {
            Self::Viewport => false,
            Self::Items(ids) => {
                let before = ids.len();
                ids.retain(|target| target != id);
                ids.len() != before
            }
        }
    }
}

/// Drag slot of the gesture state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Panning the viewport; the live delta lives in the viewport's transient pan.
    Panning,
    /// Moving the frozen selection.
    MovingItems {
        /// Items captured from the selection at drag start.
        target: GestureTarget,
        /// Effective zoom at drag start, used to convert the translation to document units.
        zoom_at_start: f64,
        /// Live translation in screen pixels.
        translation: Vector,
    },
}

impl DragState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Live screen-space offset for `id`, if this drag is moving it.
    #[must_use]
    pub fn offset_for(&self, id: &ItemId) -> Option<Vector> {
        match self {
            Self::MovingItems { target, translation, .. } if target.targets(id) => Some(*translation),
            _ => None,
        }
    }
}

/// Pinch slot of the gesture state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PinchState {
    /// No pinch in progress.
    #[default]
    Idle,
    /// Zooming the viewport; the live scale lives in the viewport's transient zoom.
    Zooming,
    /// Scaling the frozen selection.
    ScalingItems {
        /// Items captured from the selection at pinch start.
        target: GestureTarget,
        /// Live scale factor.
        scale: f64,
    },
}

impl PinchState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Live scale factor for `id`, if this pinch is scaling it.
    #[must_use]
    pub fn scale_for(&self, id: &ItemId) -> Option<f64> {
        match self {
            Self::ScalingItems { target, scale } if target.targets(id) => Some(*scale),
            _ => None,
        }
    }
}
