use std::mem;

use serde::Serialize;
use tracing::{debug, warn};

use crate::camera::{Camera, Point, Size, Vector};
use crate::config::EngineConfig;
use crate::consts::{DOUBLE_TAP, SINGLE_TAP, TRIPLE_TAP};
use crate::doc::{DocError, DocStore, Document, Item, ItemId, Snapshot};
use crate::drop::{DropRequest, Payload, resolve_drop_all};
use crate::hit;
use crate::input::{DragState, GestureEvent, GestureTarget, PinchState, TapTarget};
use crate::render::{self, Renderer};
use crate::selection::SelectionState;
use crate::viewport::ViewportState;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    ItemCreated(Item),
    ItemUpdated(Item),
    ItemDeleted { id: ItemId },
    /// The host should fetch the image and report its extent back.
    BackgroundRequested { url: String },
    SelectionChanged,
    ViewportChanged,
    /// A drop carried nothing usable; the host may flash rejection feedback.
    DropRejected,
    RenderNeeded,
}

/// Where and how large an item should be drawn right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    /// Glyph center in screen space, including any live drag offset.
    pub center: Point,
    /// Font size in screen pixels, including any live pinch scale.
    pub font_size: f64,
    pub selected: bool,
    /// Present for selected items only.
    pub outline: Option<Outline>,
}

/// Square selection outline around an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub side: f64,
    pub line_width: f64,
}

/// Gesture router: owns the viewport and selection and drives the document.
///
/// Every pinch and drag is routed once, when it begins: to the viewport if
/// nothing is selected, otherwise to the items selected at that moment. The
/// route is held until the gesture ends or is cancelled. Ending a gesture
/// commits its result with one call per affected entity; cancelling it
/// discards the transient state and commits nothing.
pub struct EngineCore<D: Document = DocStore> {
    doc: D,
    viewport: ViewportState,
    selection: SelectionState,
    drag: DragState,
    pinch: PinchState,
    view_size: Size,
    config: EngineConfig,
}

impl Default for EngineCore<DocStore> {
    fn default() -> Self {
        Self::with_document(DocStore::new(), EngineConfig::default())
    }
}

impl EngineCore<DocStore> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the document with a snapshot, dropping anything that vanished from the selection.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Vec<Action> {
        self.doc.load_snapshot(snapshot);
        let mut actions = self.sync_removals();
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}

impl<D: Document> EngineCore<D> {
    /// Build an engine around an existing document.
    pub fn with_document(doc: D, config: EngineConfig) -> Self {
        Self {
            doc,
            viewport: ViewportState::new(),
            selection: SelectionState::new(),
            drag: DragState::Idle,
            pinch: PinchState::Idle,
            view_size: Size::default(),
            config,
        }
    }

    // --- Data inputs ---

    /// Update the size of the visible view in screen pixels.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Report the decoded size of the background image (or `None` if the fetch failed).
    pub fn set_background_extent(&mut self, extent: Option<Size>) -> Vec<Action> {
        self.doc.set_background_extent(extent);
        vec![Action::RenderNeeded]
    }

    /// Remove an item that was deleted outside the gesture loop.
    pub fn apply_delete(&mut self, id: &ItemId) -> Vec<Action> {
        if let Err(e) = self.doc.remove_item(id) {
            debug!(error = %e, %id, "engine: external delete of unknown item");
        }
        self.sync_removals()
    }

    /// Drain the document's removal notifications into the selection and in-flight gestures.
    ///
    /// A removed item drops out of any gesture targeting it and gets no commit.
    pub fn sync_removals(&mut self) -> Vec<Action> {
        let removed = self.doc.take_removed();
        if removed.is_empty() {
            return Vec::new();
        }

        let mut actions = Vec::with_capacity(removed.len() + 2);
        let mut selection_changed = false;
        for id in removed {
            selection_changed |= self.selection.remove(&id);
            if let DragState::MovingItems { target, .. } = &mut self.drag {
                if target.forget(&id) {
                    debug!(%id, "engine: item removed mid-drag; skipping its commit");
                }
            }
            if let PinchState::ScalingItems { target, .. } = &mut self.pinch {
                if target.forget(&id) {
                    debug!(%id, "engine: item removed mid-pinch; skipping its commit");
                }
            }
            actions.push(Action::ItemDeleted { id });
        }
        if selection_changed {
            actions.push(Action::SelectionChanged);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Event dispatch ---

    /// Apply one gesture event.
    pub fn handle(&mut self, event: GestureEvent) -> Vec<Action> {
        match event {
            GestureEvent::DragBegan => self.begin_drag(),
            GestureEvent::DragChanged { translation } => self.update_drag(translation),
            GestureEvent::DragEnded { translation } => self.end_drag(translation),
            GestureEvent::DragCancelled => self.cancel_drag(),
            GestureEvent::PinchBegan => self.begin_pinch(),
            GestureEvent::PinchChanged { scale } => self.update_pinch(scale),
            GestureEvent::PinchEnded { scale } => self.end_pinch(scale),
            GestureEvent::PinchCancelled => self.cancel_pinch(),
            GestureEvent::Tap { count, target } => self.on_tap(count, target),
            GestureEvent::Drop { location, payloads } => self.on_drop(location, &payloads),
        }
    }

    // --- Drag ---

    /// Start a drag, routing it to the viewport or to the current selection.
    pub fn begin_drag(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.drag.is_active() {
            debug!("engine: drag began while another was active; discarding the old one");
            actions = self.cancel_drag();
        }
        self.drag = match self.selection_target() {
            GestureTarget::Viewport => {
                self.viewport.begin_pan();
                DragState::Panning
            }
            target => DragState::MovingItems {
                target,
                zoom_at_start: self.viewport.effective_zoom(),
                translation: Vector::zero(),
            },
        };
        debug!(state = ?self.drag, "engine: drag began");
        actions
    }

    /// Record the live translation of the drag (screen pixels since it began).
    ///
    /// Non-finite translations are ignored.
    pub fn update_drag(&mut self, translation: Vector) -> Vec<Action> {
        if !self.drag.is_active() {
            self.begin_drag();
        }
        if !translation.is_finite() {
            warn!(dx = translation.dx, dy = translation.dy, "engine: ignoring non-finite drag update");
            return Vec::new();
        }
        match &mut self.drag {
            DragState::Panning => self.viewport.update_pan(translation),
            DragState::MovingItems { translation: live, .. } => *live = translation,
            DragState::Idle => return Vec::new(),
        }
        vec![Action::RenderNeeded]
    }

    /// Finish the drag and commit its final translation.
    pub fn end_drag(&mut self, translation: Vector) -> Vec<Action> {
        if !self.drag.is_active() {
            self.begin_drag();
        }
        let mut actions = Vec::new();
        match mem::take(&mut self.drag) {
            DragState::Panning => match self.viewport.end_pan(translation) {
                Ok(delta) => {
                    debug!(dx = delta.dx, dy = delta.dy, "engine: pan committed");
                    actions.push(Action::ViewportChanged);
                }
                Err(e) => warn!(error = %e, "engine: pan rejected"),
            },
            DragState::MovingItems { target, zoom_at_start, .. } => {
                let GestureTarget::Items(ids) = target else {
                    return vec![Action::RenderNeeded];
                };
                if !translation.is_finite() {
                    warn!(dx = translation.dx, dy = translation.dy, "engine: selection drag rejected");
                    return vec![Action::RenderNeeded];
                }
                let delta = translation / zoom_at_start;
                debug!(count = ids.len(), dx = delta.dx, dy = delta.dy, "engine: moving selection");
                for id in ids {
                    Self::push_commit(&mut actions, &id, self.doc.move_item(&id, delta));
                }
            }
            DragState::Idle => return actions,
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Abandon the drag without committing anything.
    pub fn cancel_drag(&mut self) -> Vec<Action> {
        match mem::take(&mut self.drag) {
            DragState::Idle => Vec::new(),
            DragState::Panning => {
                self.viewport.cancel_pan();
                debug!("engine: pan cancelled");
                vec![Action::RenderNeeded]
            }
            DragState::MovingItems { .. } => {
                debug!("engine: selection drag cancelled");
                vec![Action::RenderNeeded]
            }
        }
    }

    // --- Pinch ---

    /// Start a pinch, routing it to the viewport or to the current selection.
    pub fn begin_pinch(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.pinch.is_active() {
            debug!("engine: pinch began while another was active; discarding the old one");
            actions = self.cancel_pinch();
        }
        self.pinch = match self.selection_target() {
            GestureTarget::Viewport => {
                self.viewport.begin_zoom();
                PinchState::Zooming
            }
            target => PinchState::ScalingItems { target, scale: 1.0 },
        };
        debug!(state = ?self.pinch, "engine: pinch began");
        actions
    }

    /// Record the live scale of the pinch. Non-positive scales are ignored.
    pub fn update_pinch(&mut self, scale: f64) -> Vec<Action> {
        if !self.pinch.is_active() {
            self.begin_pinch();
        }
        match &mut self.pinch {
            PinchState::Zooming => self.viewport.update_zoom(scale),
            PinchState::ScalingItems { scale: live, .. } => {
                if scale > 0.0 && scale.is_finite() {
                    *live = scale;
                }
            }
            PinchState::Idle => return Vec::new(),
        }
        vec![Action::RenderNeeded]
    }

    /// Finish the pinch and commit its final scale.
    pub fn end_pinch(&mut self, scale: f64) -> Vec<Action> {
        if !self.pinch.is_active() {
            self.begin_pinch();
        }
        let mut actions = Vec::new();
        match mem::take(&mut self.pinch) {
            PinchState::Zooming => match self.viewport.end_zoom(scale) {
                Ok(zoom) => {
                    debug!(zoom, "engine: zoom committed");
                    actions.push(Action::ViewportChanged);
                }
                Err(e) => warn!(error = %e, "engine: zoom rejected"),
            },
            PinchState::ScalingItems { target, .. } => {
                let GestureTarget::Items(ids) = target else {
                    return vec![Action::RenderNeeded];
                };
                debug!(count = ids.len(), scale, "engine: scaling selection");
                for id in ids {
                    Self::push_commit(&mut actions, &id, self.doc.scale_item(&id, scale));
                }
            }
            PinchState::Idle => return actions,
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Abandon the pinch without committing anything.
    pub fn cancel_pinch(&mut self) -> Vec<Action> {
        match mem::take(&mut self.pinch) {
            PinchState::Idle => Vec::new(),
            PinchState::Zooming => {
                self.viewport.cancel_zoom();
                debug!("engine: zoom cancelled");
                vec![Action::RenderNeeded]
            }
            PinchState::ScalingItems { .. } => {
                debug!("engine: selection pinch cancelled");
                vec![Action::RenderNeeded]
            }
        }
    }

    // --- Taps ---

    /// Apply a tap of `count` consecutive touches on `target`.
    pub fn on_tap(&mut self, count: u32, target: TapTarget) -> Vec<Action> {
        match (count, target) {
            (SINGLE_TAP, TapTarget::Item(id)) => {
                if self.doc.item(&id).is_none() {
                    debug!(%id, "engine: tap on unknown item ignored");
                    return Vec::new();
                }
                let selected = self.selection.toggle(id);
                debug!(%id, selected, "engine: selection toggled");
                vec![Action::SelectionChanged, Action::RenderNeeded]
            }
            (SINGLE_TAP, TapTarget::Canvas) => {
                if self.selection.clear() {
                    vec![Action::SelectionChanged, Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            (DOUBLE_TAP, TapTarget::Canvas) => {
                let extent = self.doc.background().and_then(|bg| bg.extent);
                if self.viewport.fit_to_content(extent, self.view_size) {
                    debug!(zoom = self.viewport.steady_zoom(), "engine: zoomed to fit background");
                    vec![Action::ViewportChanged, Action::RenderNeeded]
                } else {
                    debug!("engine: nothing to fit");
                    Vec::new()
                }
            }
            (TRIPLE_TAP, TapTarget::Item(id)) => self.delete_item(&id),
            (count, target) => {
                debug!(count, ?target, "engine: tap ignored");
                Vec::new()
            }
        }
    }

    /// Apply a tap at a screen location, hit-testing to find what it landed on.
    pub fn on_tap_at(&mut self, count: u32, screen_pt: Point) -> Vec<Action> {
        let target = hit::tap_target(screen_pt, self.doc.items(), &self.camera());
        self.on_tap(count, target)
    }

    fn delete_item(&mut self, id: &ItemId) -> Vec<Action> {
        match self.doc.remove_item(id) {
            Ok(item) => debug!(id = %item.id, text = %item.text, "engine: item deleted"),
            Err(e) => warn!(error = %e, %id, "engine: delete failed"),
        }
        self.sync_removals()
    }

    // --- Drops ---

    /// Apply a drop of `payloads` at a screen location.
    pub fn on_drop(&mut self, location: Point, payloads: &[Payload]) -> Vec<Action> {
        let camera = self.viewport.steady_camera(self.view_size);
        let requests = match resolve_drop_all(location, &camera, payloads, self.config.default_item_size) {
            Ok(requests) => requests,
            Err(e) => {
                warn!(error = %e, "engine: drop rejected");
                return vec![Action::DropRejected];
            }
        };

        let mut actions = Vec::with_capacity(requests.len() + 1);
        for request in requests {
            match request {
                DropRequest::SetBackground { url } => {
                    self.doc.set_background_reference(&url);
                    debug!(%url, "engine: background requested");
                    actions.push(Action::BackgroundRequested { url });
                }
                DropRequest::AddItem { text, location, size } => match self.doc.add_item(&text, location, size) {
                    Ok(id) => {
                        if let Some(item) = self.doc.item(&id) {
                            debug!(%id, %text, x = location.x, y = location.y, "engine: item added");
                            actions.push(Action::ItemCreated(item.clone()));
                        }
                    }
                    Err(e) => warn!(error = %e, %text, "engine: add item failed"),
                },
            }
        }

        if actions.is_empty() {
            return vec![Action::DropRejected];
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Render ---

    /// Draw the current state through `renderer`.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the renderer.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        render::draw(renderer, self)
    }

    // --- Queries ---

    #[must_use]
    pub fn doc(&self) -> &D {
        &self.doc
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    #[must_use]
    pub fn pinch_state(&self) -> &PinchState {
        &self.pinch
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// The camera for this instant, including in-flight gesture deltas.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.viewport.camera(self.view_size)
    }

    /// The topmost item under a screen point.
    #[must_use]
    pub fn item_at(&self, screen_pt: Point) -> Option<ItemId> {
        hit::hit_test(screen_pt, self.doc.items(), &self.camera())
    }

    /// Screen placement of `item`, including live drag/pinch deltas if it is a gesture target.
    #[must_use]
    pub fn placement(&self, item: &Item) -> ItemPlacement {
        let camera = self.camera();
        let scale = self.pinch.scale_for(&item.id).unwrap_or(1.0);
        let offset = self.drag.offset_for(&item.id).unwrap_or_default();
        let font_size = item.size * camera.zoom * scale;
        let selected = self.selection.contains(&item.id);
        let outline = selected.then(|| Outline {
            side: self.config.outline_scale * font_size,
            line_width: self.config.outline_line_width * camera.zoom,
        });
        ItemPlacement { center: camera.document_to_screen(item.location) + offset, font_size, selected, outline }
    }

    // --- Internals ---

    /// Route for a gesture starting now: the viewport, or the selected items in draw order.
    fn selection_target(&self) -> GestureTarget {
        if self.selection.is_empty() {
            return GestureTarget::Viewport;
        }
        let ids: Vec<ItemId> = self
            .doc
            .items()
            .iter()
            .map(|item| item.id)
            .filter(|id| self.selection.contains(id))
            .collect();
        GestureTarget::Items(ids)
    }

    fn push_commit(actions: &mut Vec<Action>, id: &ItemId, result: Result<Item, DocError>) {
        match result {
            Ok(item) => actions.push(Action::ItemUpdated(item)),
            Err(DocError::NotFound(_)) => warn!(%id, "engine: commit skipped; item vanished"),
            Err(e) => warn!(error = %e, %id, "engine: commit rejected"),
        }
    }
}
