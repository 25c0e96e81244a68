//! Viewport state: steady pan/zoom plus the transient deltas of in-flight gestures.
//!
//! The steady values survive across gestures. The transient values exist only
//! while a pan or zoom gesture is active and are folded into the steady values
//! when the gesture ends (or discarded when it is cancelled). Renderers read
//! the combined *effective* values at any instant, including mid-gesture.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::camera::{Camera, Size, Vector};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ViewportError {
    #[error("invalid zoom: {0} (must be positive and finite)")]
    InvalidZoom(f64),
    #[error("invalid translation: ({dx}, {dy}) (must be finite)")]
    InvalidTranslation { dx: f64, dy: f64 },
}

/// In-flight pan. The translation is in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanGesture {
    zoom_at_start: f64,
    translation: Vector,
}

/// In-flight zoom. The scale is relative to the steady zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ZoomGesture {
    scale: f64,
}

fn valid_zoom(zoom: f64) -> bool {
    zoom > 0.0 && zoom.is_finite()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    steady_pan: Vector,
    steady_zoom: f64,
    pan: Option<PanGesture>,
    zoom: Option<ZoomGesture>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self { steady_pan: Vector::zero(), steady_zoom: 1.0, pan: None, zoom: None }
    }
}

impl ViewportState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Pan ---

    /// Start a pan gesture, capturing the effective zoom used to scale its deltas.
    pub fn begin_pan(&mut self) {
        self.pan = Some(PanGesture { zoom_at_start: self.effective_zoom(), translation: Vector::zero() });
    }

    /// Record the live translation (screen pixels) of the active pan. Non-finite translations are ignored.
    pub fn update_pan(&mut self, translation: Vector) {
        if self.pan.is_none() {
            self.begin_pan();
        }
        if !translation.is_finite() {
            return;
        }
        if let Some(pan) = self.pan.as_mut() {
            pan.translation = translation;
        }
    }

    /// Fold the final translation into the steady pan and return the document-space delta applied.
    ///
    /// The transient pan is reset even when the translation is rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTranslation` if either component is not finite; the steady pan is left unchanged.
    pub fn end_pan(&mut self, translation: Vector) -> Result<Vector, ViewportError> {
        let zoom_at_start = match self.pan.take() {
            Some(pan) => pan.zoom_at_start,
            None => self.effective_zoom(),
        };
        if !translation.is_finite() {
            return Err(ViewportError::InvalidTranslation { dx: translation.dx, dy: translation.dy });
        }
        let delta = translation / zoom_at_start;
        self.steady_pan += delta;
        Ok(delta)
    }

    /// Discard the active pan without touching the steady pan.
    pub fn cancel_pan(&mut self) {
        self.pan = None;
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    // --- Zoom ---

    pub fn begin_zoom(&mut self) {
        self.zoom = Some(ZoomGesture { scale: 1.0 });
    }

    /// Record the live scale of the active zoom. Non-positive scales are ignored.
    pub fn update_zoom(&mut self, scale: f64) {
        if self.zoom.is_none() {
            self.begin_zoom();
        }
        if !valid_zoom(scale) {
            return;
        }
        if let Some(zoom) = self.zoom.as_mut() {
            zoom.scale = scale;
        }
    }

    /// Fold the final scale into the steady zoom and return the new steady zoom.
    ///
    /// The transient zoom is reset even when the scale is rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidZoom` if `scale` (or the resulting zoom) is not positive and finite.
    pub fn end_zoom(&mut self, scale: f64) -> Result<f64, ViewportError> {
        self.zoom = None;
        if !valid_zoom(scale) {
            return Err(ViewportError::InvalidZoom(scale));
        }
        self.set_zoom(self.steady_zoom * scale)
    }

    /// Discard the active zoom without touching the steady zoom.
    pub fn cancel_zoom(&mut self) {
        self.zoom = None;
    }

    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.zoom.is_some()
    }

    /// Replace the steady zoom.
    ///
    /// # Errors
    ///
    /// Returns `InvalidZoom` if `zoom` is not positive and finite; the steady zoom is left unchanged.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<f64, ViewportError> {
        if !valid_zoom(zoom) {
            return Err(ViewportError::InvalidZoom(zoom));
        }
        self.steady_zoom = zoom;
        Ok(zoom)
    }

    /// Center the document and zoom so `content` fits entirely inside `view`.
    ///
    /// Returns false (and changes nothing) when the content extent is absent or degenerate.
    pub fn fit_to_content(&mut self, content: Option<Size>, view: Size) -> bool {
        let Some(content) = content else {
            return false;
        };
        if !content.is_positive() {
            return false;
        }
        let zoom = (view.width / content.width).min(view.height / content.height);
        if !valid_zoom(zoom) {
            return false;
        }
        self.steady_pan = Vector::zero();
        self.steady_zoom = zoom;
        true
    }

    // --- Queries ---

    #[must_use]
    pub fn steady_pan(&self) -> Vector {
        self.steady_pan
    }

    #[must_use]
    pub fn steady_zoom(&self) -> f64 {
        self.steady_zoom
    }

    /// Live pan delta in document units; zero when no pan is active.
    #[must_use]
    pub fn transient_pan(&self) -> Vector {
        self.pan.map_or(Vector::zero(), |pan| pan.translation / pan.zoom_at_start)
    }

    /// Live zoom factor; 1.0 when no zoom is active.
    #[must_use]
    pub fn transient_zoom(&self) -> f64 {
        self.zoom.map_or(1.0, |zoom| zoom.scale)
    }

    #[must_use]
    pub fn effective_zoom(&self) -> f64 {
        self.steady_zoom * self.transient_zoom()
    }

    /// Pan offset in screen pixels, as seen by the renderer.
    #[must_use]
    pub fn effective_pan(&self) -> Vector {
        (self.steady_pan + self.transient_pan()) * self.effective_zoom()
    }

    /// Camera for the current instant, including in-flight gesture deltas.
    #[must_use]
    pub fn camera(&self, view: Size) -> Camera {
        Camera::new(self.effective_pan(), self.effective_zoom(), view)
    }

    /// Camera built from the steady values only.
    #[must_use]
    pub fn steady_camera(&self, view: Size) -> Camera {
        Camera::new(self.steady_pan * self.steady_zoom, self.steady_zoom, view)
    }
}
