//! Rendering: walks the scene and hands screen-space primitives to a [`Renderer`].
//!
//! Pixel output lives behind the `Renderer` trait; this module only decides
//! what goes where. It reads the document, viewport, selection, and in-flight
//! gesture state through [`EngineCore`] and never mutates any of them.
//!
//! Draw order: background first, then items in document order, each followed
//! by its selection outline when selected.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::Point;
use crate::doc::Document;
use crate::engine::EngineCore;

/// Sink for screen-space draw calls.
pub trait Renderer {
    type Error;

    /// Draw the background image with its center at `origin`, scaled by `zoom`.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn draw_background(&mut self, url: &str, origin: Point, zoom: f64) -> Result<(), Self::Error>;

    /// Draw a glyph centered at `center` with the given font size.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn draw_item(&mut self, text: &str, center: Point, font_size: f64) -> Result<(), Self::Error>;

    /// Stroke a square outline of side `side` centered at `center`.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn draw_selection_outline(&mut self, center: Point, side: f64, line_width: f64) -> Result<(), Self::Error>;
}

/// Draw the full scene.
///
/// # Errors
///
/// Returns the first error reported by `renderer`; later primitives are not drawn.
pub fn draw<R, D>(renderer: &mut R, engine: &EngineCore<D>) -> Result<(), R::Error>
where
    R: Renderer,
    D: Document,
{
    let camera = engine.camera();

    // Layer 1: background, positioned with the document origin.
    if let Some(background) = engine.doc().background() {
        renderer.draw_background(&background.url, camera.document_to_screen(Point::zero()), camera.zoom)?;
    }

    // Layer 2: items, each with its outline.
    for item in engine.doc().items() {
        let placement = engine.placement(item);
        renderer.draw_item(&item.text, placement.center, placement.font_size)?;
        if let Some(outline) = placement.outline {
            renderer.draw_selection_outline(placement.center, outline.side, outline.line_width)?;
        }
    }

    Ok(())
}
